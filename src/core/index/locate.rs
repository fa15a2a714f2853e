//! Locating the compiled declarations artifact for a module root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::core::error::ConfigError;
use crate::core::parsers::tsconfig::resolve_output_dir;

/// Find the declarations artifact of the module at `module_root`.
///
/// The build configuration names the output directory. The artifact is taken
/// from the top of that directory, or else searched for below it; exactly one
/// match is accepted.
pub fn locate_artifact(module_root: &Path, config: &Config) -> Result<PathBuf, ConfigError> {
    let build_config = module_root.join(&config.build_config);
    if !build_config.is_file() {
        return Err(ConfigError::MissingBuildConfig {
            root: module_root.to_path_buf(),
            file: config.build_config.clone(),
        });
    }

    let out_dir = resolve_output_dir(&build_config)?;
    if !out_dir.is_dir() {
        return Err(ConfigError::MissingOutputDir { path: out_dir });
    }

    let direct = out_dir.join(&config.declaration_file);
    if direct.is_file() {
        return Ok(direct);
    }

    let mut found: Vec<PathBuf> = WalkDir::new(&out_dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file() && entry.file_name() == config.declaration_file.as_str()
        })
        .map(|entry| entry.into_path())
        .collect();

    match found.len() {
        0 => Err(ConfigError::MissingArtifact {
            dir: out_dir,
            file: config.declaration_file.clone(),
        }),
        1 => Ok(found.remove(0)),
        _ => {
            found.sort();
            Err(ConfigError::AmbiguousArtifact {
                dir: out_dir,
                file: config.declaration_file.clone(),
                found,
            })
        }
    }
}
