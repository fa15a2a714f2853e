use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod extract;
mod init;
mod list;

const BIN_NAME: &str = "apiref";

/// Declarations used by most tests.
pub const BUTTON_DTS: &str = r#"
import type { CSSProperties } from 'react';

interface BaseProps {
    /** Element id. */
    id?: string;
}

/**
 * Props of the button.
 *
 * @remarks
 * Spread onto the native element.
 */
export interface ButtonProps extends BaseProps {
    /**
     * font size
     * @reactive
     * @defaultValue 16px
     */
    fontSize: string;
    size: ButtonSize;
}

/** Button sizes. */
export type ButtonSize = 'sm' | 'md' | 'lg';

export type ButtonStyle = CSSProperties;

/**
 * Clamp a value.
 * @param value - input value
 * @param max - upper bound
 */
export declare function clamp(value: number, max?: number): number;

export declare const VERSION: string;
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A built package: `tsconfig.json` pointing at `dist/` and `dist/index.d.ts`.
    pub fn with_package(dts: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".git/HEAD", "ref: refs/heads/main\n")?;
        test.write_file(
            "tsconfig.json",
            r#"{
  // compiled output
  "compilerOptions": {
    "declaration": true,
    "outDir": "dist",
  },
}"#,
        )?;
        test.write_file("dist/index.d.ts", dts)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn list_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("list");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
