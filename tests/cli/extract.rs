use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{BUTTON_DTS, CliTest, stderr, stdout};

#[test]
fn test_extract_named_exports_in_order() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["ButtonSize", "ButtonProps"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!([
            {
                "name": "ButtonSize",
                "summary": "Button sizes.",
                "type": "\"sm\" | \"md\" | \"lg\""
            },
            {
                "name": "ButtonProps",
                "summary": "Props of the button.",
                "remarks": "Spread onto the native element.",
                "fields": [
                    {
                        "name": "fontSize",
                        "summary": "font size",
                        "type": "string",
                        "preset": "16px",
                        "reactive": true
                    },
                    { "name": "size", "type": "ButtonSize" },
                    { "name": "id", "summary": "Element id.", "type": "string" }
                ]
            }
        ])
    );

    Ok(())
}

#[test]
fn test_extract_function_and_opaque_alias() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["clamp", "ButtonStyle", "--compact"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1, "compact output is one line");
    let parsed: Value = serde_json::from_str(&text)?;
    assert_eq!(
        parsed,
        json!([
            {
                "name": "clamp",
                "summary": "Clamp a value.",
                "type": "function clamp(value: number, max?: number): number",
                "fields": [
                    { "name": "value", "summary": "input value", "type": "number" },
                    { "name": "max", "summary": "upper bound", "type": "number" }
                ]
            },
            { "name": "ButtonStyle", "type": "CSSProperties" }
        ])
    );

    Ok(())
}

#[test]
fn test_extract_unknown_name_fails_whole_batch() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["ButtonProps", "DoesNotExist", "ButtonSize"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("DoesNotExist"));

    Ok(())
}

#[test]
fn test_extract_unsupported_kind_is_not_found() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test.extract_command().arg("VERSION").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("VERSION"));

    Ok(())
}

#[test]
fn test_extract_all_with_include() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["--all", "--include", "Button*"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ButtonProps", "ButtonSize", "ButtonStyle"]);

    Ok(())
}

#[test]
fn test_extract_all_uses_config_includes() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;
    test.write_file(".apirefrc.json", r#"{ "includes": ["clamp"] }"#)?;

    let output = test.extract_command().arg("--all").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["name"], "clamp");

    Ok(())
}

#[test]
fn test_extract_custom_tags_from_config() -> Result<()> {
    let test = CliTest::with_package(
        r#"
export interface Props {
    /**
     * Tracked value.
     * @observable
     * @fallback 0
     */
    value: number;
}
"#,
    )?;
    test.write_file(
        ".apirefrc.json",
        r#"{ "reactiveTag": "observable", "defaultTag": "fallback" }"#,
    )?;

    let output = test.extract_command().arg("Props").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed[0]["fields"][0],
        json!({
            "name": "value",
            "summary": "Tracked value.",
            "type": "number",
            "preset": "0",
            "reactive": true
        })
    );

    Ok(())
}

#[test]
fn test_extract_to_output_file() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["ButtonSize", "--output", "api.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Wrote 1 description to api.json"));

    let parsed: Value = serde_json::from_str(&test.read_file("api.json")?)?;
    assert_eq!(parsed[0]["name"], "ButtonSize");

    Ok(())
}

#[test]
fn test_extract_with_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".git/HEAD", "ref: refs/heads/main\n")?;
    test.write_file(
        "packages/ui/tsconfig.json",
        r#"{ "compilerOptions": { "declarationDir": "types" } }"#,
    )?;
    test.write_file("packages/ui/types/index.d.ts", BUTTON_DTS)?;

    let output = test
        .extract_command()
        .args(["ButtonSize", "--root", "packages/ui"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_extract_missing_build_config() -> Result<()> {
    let test = CliTest::with_file(".git/HEAD", "ref: refs/heads/main\n")?;

    let output = test.extract_command().arg("ButtonProps").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("tsconfig.json"));

    Ok(())
}

#[test]
fn test_extract_missing_artifact() -> Result<()> {
    let test = CliTest::with_file(
        "tsconfig.json",
        r#"{ "compilerOptions": { "outDir": "dist" } }"#,
    )?;
    test.write_file(".git/HEAD", "ref: refs/heads/main\n")?;
    test.write_file("dist/index.js", "")?;

    let output = test.extract_command().arg("ButtonProps").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("index.d.ts"));

    Ok(())
}

#[test]
fn test_extract_requires_names() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test.extract_command().output()?;

    assert!(!output.status.success());

    Ok(())
}
