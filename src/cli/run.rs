/// Main entry point for the apiref CLI.
///
/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(ExitStatus)` when the command ran to completion
/// - `Err` if the command fails (e.g., config not found, unknown export)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init, list::list},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
