use anyhow::Result;

use super::super::{args::ListCommand, exit_status::ExitStatus, report::print_exports};
use super::helper::{module_config, open_module};

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let config = module_config(&cmd.common)?;
    let builder = open_module(&cmd.common, &config)?;

    print_exports(builder.index().exports());
    Ok(ExitStatus::Success)
}
