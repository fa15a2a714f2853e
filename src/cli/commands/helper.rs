use anyhow::{Context, Result};

use super::super::{args::CommonArgs, report::print_default_config_note};
use crate::config::{Config, load_config};
use crate::core::ApiObjectBuilder;

/// Load the configuration governing the module root.
pub fn module_config(common: &CommonArgs) -> Result<Config> {
    let start = common
        .root
        .canonicalize()
        .with_context(|| format!("Module root not found: {}", common.root.display()))?;
    let loaded = load_config(&start)?;
    if !loaded.from_file {
        print_default_config_note(common.verbose);
    }
    Ok(loaded.config)
}

/// Index the module root with `config`.
pub fn open_module(common: &CommonArgs, config: &Config) -> Result<ApiObjectBuilder> {
    Ok(ApiObjectBuilder::build(&common.root, config)?)
}
