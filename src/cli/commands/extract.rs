use std::fs;

use anyhow::{Context, Result};
use glob::Pattern;

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report::print_written};
use super::helper::{module_config, open_module};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let mut config = module_config(&cmd.common)?;
    if !cmd.include.is_empty() {
        config.includes = cmd.include.clone();
        config.validate()?;
    }
    let builder = open_module(&cmd.common, &config)?;

    let names: Vec<String> = if cmd.all {
        select_names(builder.exported_names(), &config.include_patterns()?)
    } else {
        cmd.names.clone()
    };
    tracing::debug!("describing {} export(s)", names.len());

    let descriptions = builder.query(&names)?;
    let json = if cmd.compact {
        serde_json::to_string(&descriptions)?
    } else {
        serde_json::to_string_pretty(&descriptions)?
    };

    match &cmd.output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_written(descriptions.len(), &path.display().to_string());
        }
        None => println!("{}", json),
    }

    Ok(ExitStatus::Success)
}

/// Names matching any pattern; all names when there are no patterns.
fn select_names(names: Vec<&str>, patterns: &[Pattern]) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| patterns.is_empty() || patterns.iter().any(|p| p.matches(name)))
        .map(str::to_string)
        .collect()
}
