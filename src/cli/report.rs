//! Report formatting and printing utilities.
//!
//! Separate from core logic so apiref can be used as a library.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::ExportedSymbol;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print exported symbols as an aligned `name  kind` table to stdout.
pub fn print_exports(symbols: &[ExportedSymbol]) {
    print_exports_to(symbols, &mut io::stdout().lock());
}

/// Print exported symbols to a custom writer.
pub fn print_exports_to<W: Write>(symbols: &[ExportedSymbol], writer: &mut W) {
    if symbols.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.yellow(),
            "No supported exports found".yellow()
        );
        return;
    }

    let name_width = symbols
        .iter()
        .map(|symbol| UnicodeWidthStr::width(symbol.name.as_str()))
        .max()
        .unwrap_or(0);

    for symbol in symbols {
        let kind = symbol.kind().map_or("-", |kind| kind.as_str());
        let padding = name_width - UnicodeWidthStr::width(symbol.name.as_str());
        let overloads = match symbol.candidates.len() {
            0 | 1 => String::new(),
            n => format!(" ({} declarations)", n),
        };
        let _ = writeln!(
            writer,
            "{}{}  {}{}",
            symbol.name.bold(),
            " ".repeat(padding),
            kind.cyan(),
            overloads.dimmed()
        );
    }

    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {}",
            symbols.len(),
            if symbols.len() == 1 { "export" } else { "exports" }
        )
        .green()
    );
}

/// Print a success message after writing extracted descriptions.
pub fn print_written(count: usize, path: &str) {
    print_written_to(count, path, &mut io::stderr().lock());
}

pub fn print_written_to<W: Write>(count: usize, path: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} to {}",
            count,
            if count == 1 { "description" } else { "descriptions" },
            path
        )
        .green()
    );
}

/// Print a success message after `init` wrote the configuration.
pub fn print_created(path: &Path) {
    print_created_to(path, &mut io::stdout().lock());
}

pub fn print_created_to<W: Write>(path: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", display_path(path)).green()
    );
}

/// Print the refusal to overwrite an existing configuration.
pub fn print_config_exists(path: &Path) {
    print_config_exists_to(path, &mut io::stderr().lock());
}

pub fn print_config_exists_to<W: Write>(path: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} already exists",
        FAILURE_MARK.red(),
        display_path(path)
    );
}

/// Paths under the working directory print without the leading `./`.
fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

/// Print a note that the configuration file was not found.
pub fn print_default_config_note(verbose: bool) {
    if verbose {
        let _ = writeln!(
            io::stderr().lock(),
            "{} no {} found, using defaults",
            "note:".bold().cyan(),
            crate::config::CONFIG_FILE_NAME
        );
    }
}
