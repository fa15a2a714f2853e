use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".apirefrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Build configuration file inside a module root.
    #[serde(default = "default_build_config")]
    pub build_config: String,
    /// Conventional name of the compiled declarations artifact.
    #[serde(default = "default_declaration_file")]
    pub declaration_file: String,
    /// Modifier tag marking a member as reactive (without `@`).
    #[serde(default = "default_reactive_tag")]
    pub reactive_tag: String,
    /// Block tag used as an alternate default-value description (without `@`).
    #[serde(default = "default_default_tag")]
    pub default_tag: String,
    /// Glob patterns selecting export names for `extract --all`.
    #[serde(default)]
    pub includes: Vec<String>,
}

fn default_build_config() -> String {
    "tsconfig.json".to_string()
}

fn default_declaration_file() -> String {
    "index.d.ts".to_string()
}

fn default_reactive_tag() -> String {
    "reactive".to_string()
}

fn default_default_tag() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_config: default_build_config(),
            declaration_file: default_declaration_file(),
            reactive_tag: default_reactive_tag(),
            default_tag: default_default_tag(),
            includes: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `includes` is invalid or a tag
    /// name is empty or written with its `@` prefix.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }

        for (key, tag) in [
            ("reactiveTag", &self.reactive_tag),
            ("defaultTag", &self.default_tag),
        ] {
            if tag.is_empty() || tag.starts_with('@') || tag.contains(char::is_whitespace) {
                bail!("Invalid tag name in '{}': \"{}\"", key, tag);
            }
        }

        if self.reactive_tag == self.default_tag {
            bail!("'reactiveTag' and 'defaultTag' must differ");
        }

        Ok(())
    }

    /// Compiled `includes` patterns.
    pub fn include_patterns(&self) -> Result<Vec<Pattern>> {
        self.includes
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
