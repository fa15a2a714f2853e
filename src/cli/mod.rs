//! Command-line interface layer.
//!
//! - `args`: clap argument definitions
//! - `commands`: command handlers
//! - `report`: terminal output
//! - `exit_status`: process exit codes

use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, ExtractCommand, InitCommand, ListCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = run::run(args)?;
    Ok(status.into())
}
