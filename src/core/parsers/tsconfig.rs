//! `tsconfig.json` loading.
//!
//! Only the options needed to find the compiled declarations are read:
//! `compilerOptions.declarationDir`, `compilerOptions.outDir` and `extends`.
//! The file is JSON with comments and trailing commas allowed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::core::error::ConfigError;

/// Maximum length of an `extends` chain.
const MAX_EXTENDS_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: RawCompilerOptions,
}

/// `extends` takes one path or, since TypeScript 5.0, a list of paths.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    /// The relative config file consulted for missing options; later entries win.
    fn relative(self) -> Option<String> {
        match self {
            Extends::One(path) => Some(path).filter(|p| p.starts_with('.')),
            Extends::Many(paths) => paths.into_iter().rev().find(|p| p.starts_with('.')),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    #[serde(default)]
    declaration_dir: Option<String>,
    #[serde(default)]
    out_dir: Option<String>,
}

/// Resolve the directory holding the compiled declarations for `config_path`.
///
/// `declarationDir` wins over `outDir`. Paths are relative to the file that sets
/// them; when neither is set locally, a relative `extends` target is consulted.
pub fn resolve_output_dir(config_path: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = config_path.to_path_buf();

    for _ in 0..MAX_EXTENDS_DEPTH {
        let raw = read_tsconfig(&current)?;
        let base_dir = current.parent().unwrap_or(Path::new("."));

        let options = raw.compiler_options;
        if let Some(dir) = options.declaration_dir.or(options.out_dir) {
            return Ok(base_dir.join(dir));
        }

        match raw.extends.and_then(Extends::relative) {
            Some(parent) => {
                let mut next = base_dir.join(&parent);
                if !next.exists() {
                    next = base_dir.join(format!("{}.json", parent));
                }
                tracing::debug!("following tsconfig extends: {}", next.display());
                current = next;
            }
            None => break,
        }
    }

    Err(ConfigError::NoOutputDir {
        path: config_path.to_path_buf(),
    })
}

fn read_tsconfig(path: &Path) -> Result<RawTsConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&strip_jsonc(&content)).map_err(|e| ConfigError::InvalidBuildConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Remove comments and trailing commas so the text parses as plain JSON.
///
/// String literals are copied untouched, so `"./src/**/*"` survives.
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    // Position in `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                pending_comma = None;
                out.push(c);
                while let Some(s) = chars.next() {
                    out.push(s);
                    match s {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                out.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for s in chars.by_ref() {
                    if s == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for s in chars.by_ref() {
                    if prev == '*' && s == '/' {
                        break;
                    }
                    prev = s;
                }
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(c);
            }
            '}' | ']' => {
                if let Some(pos) = pending_comma.take() {
                    out.remove(pos);
                }
                out.push(c);
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                pending_comma = None;
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_strip_comments_and_trailing_commas() {
        let input = r#"{
  // line comment
  "compilerOptions": { /* block */ "outDir": "dist", },
  "include": ["src/**/*",],
}"#;
        let value: serde_json::Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["compilerOptions"]["outDir"], "dist");
        assert_eq!(value["include"][0], "src/**/*");
    }

    #[test]
    fn test_strings_are_preserved() {
        let input = r#"{ "a": "http://x/*y*/", "b": "q\"//," }"#;
        let value: serde_json::Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["a"], "http://x/*y*/");
        assert_eq!(value["b"], "q\"//,");
    }

    #[test]
    fn test_declaration_dir_wins_over_out_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(
            &path,
            r#"{ "compilerOptions": { "outDir": "dist", "declarationDir": "types" } }"#,
        )
        .unwrap();

        assert_eq!(resolve_output_dir(&path).unwrap(), dir.path().join("types"));
    }

    #[test]
    fn test_out_dir_from_extended_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.base.json"),
            r#"{ "compilerOptions": { "outDir": "build" } }"#,
        )
        .unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, r#"{ "extends": "./tsconfig.base" }"#).unwrap();

        assert_eq!(resolve_output_dir(&path).unwrap(), dir.path().join("build"));
    }

    #[test]
    fn test_extends_list_uses_last_relative_entry() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("first.json"),
            r#"{ "compilerOptions": { "outDir": "first" } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("second.json"),
            r#"{ "compilerOptions": { "outDir": "second" } }"#,
        )
        .unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(
            &path,
            r#"{ "extends": ["./first.json", "./second.json", "@tsconfig/node20"] }"#,
        )
        .unwrap();

        assert_eq!(resolve_output_dir(&path).unwrap(), dir.path().join("second"));
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, r#"{ "compilerOptions": { "strict": true } }"#).unwrap();

        let err = resolve_output_dir(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NoOutputDir { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        fs::write(&path, r#"{ "compilerOptions": "#).unwrap();

        let err = resolve_output_dir(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBuildConfig { .. }));
    }
}
