use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr_of, stdout_of};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"][0], "src/**/*.ts");
    assert_eq!(parsed["target"], "ES6");
    assert_eq!(parsed["module"], "commonjs");
    assert!(parsed.get("outDir").is_none(), "Unset outputs should be omitted");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Created .tsjsdocrc.json"));

    assert!(test.root().join(".tsjsdocrc.json").exists());
    let content = test.read_file(".tsjsdocrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tsjsdocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains(".tsjsdocrc.json already exists"));
    assert_eq!(test.read_file(".tsjsdocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.ts", "export class App {}")?;

    let output = test.compile_command().output()?;
    assert!(
        output.status.success(),
        "Compile should work with initialized config. stderr: {}",
        stderr_of(&output)
    );
    assert!(test.root().join("src/app.jsdoc").exists());

    Ok(())
}
