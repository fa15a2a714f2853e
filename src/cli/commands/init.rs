use std::fs;

use anyhow::{Context, Result};

use super::super::args::InitCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration into the module root.
///
/// An existing configuration is never overwritten.
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let root = &cmd.common.root;
    if !root.is_dir() {
        anyhow::bail!("Module root {} is not a directory", root.display());
    }

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        report::print_config_exists(&config_path);
        return Ok(ExitStatus::Error);
    }

    let json = default_config_json()?;
    fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "wrote default configuration");
    report::print_created(&config_path);

    Ok(ExitStatus::Success)
}
