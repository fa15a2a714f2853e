use anyhow::{Context, Result};
use serde_json::Value;

use crate::{BUTTON_DTS, CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["buildConfig"], "tsconfig.json");
    assert_eq!(parsed["declarationFile"], "index.d.ts");
    assert_eq!(parsed["reactiveTag"], "reactive");
    assert_eq!(parsed["defaultTag"], "default");
    assert!(
        parsed.get("includes").is_some(),
        "Config should have 'includes' field"
    );

    // 2-space indentation
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .apirefrc.json"));

    assert!(test.root().join(".apirefrc.json").exists());
    assert_config_content(&test.read_file(".apirefrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".apirefrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".apirefrc.json already exists"));
    assert_eq!(test.read_file(".apirefrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    test.command().arg("init").output()?;

    let output = test.extract_command().arg("ButtonSize").output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_init_in_module_root() -> Result<()> {
    let test = CliTest::with_file("packages/ui/tsconfig.json", "{}")?;

    let output = test
        .command()
        .args(["init", "--root", "packages/ui"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created packages/ui/.apirefrc.json"));

    assert!(!test.root().join(".apirefrc.json").exists());
    assert_config_content(&test.read_file("packages/ui/.apirefrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_missing_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["init", "--root", "missing"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("not a directory"));

    Ok(())
}
