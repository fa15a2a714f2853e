use anyhow::Result;

use crate::{BUTTON_DTS, CliTest, stderr, stdout};

#[test]
fn test_list_exports() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test.list_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("ButtonProps  interface\n"));
    assert!(text.contains("ButtonSize   type-alias\n"));
    assert!(text.contains("ButtonStyle  type-alias\n"));
    assert!(text.contains("clamp        function\n"));
    assert!(text.contains("4 exports"));
    assert!(!text.contains("VERSION"));
    assert!(!text.contains("BaseProps"));

    Ok(())
}

#[test]
fn test_list_verbose_logs_index() -> Result<()> {
    let test = CliTest::with_package(BUTTON_DTS)?;

    let output = test.list_command().arg("--verbose").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("indexed"));

    Ok(())
}

#[test]
fn test_list_without_exports() -> Result<()> {
    let test = CliTest::with_package("export declare const VERSION: string;\n")?;

    let output = test.list_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No supported exports found"));

    Ok(())
}
