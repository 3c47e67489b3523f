use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr_of, stdout_of};

#[test]
fn test_compile_writes_sibling_outputs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/models/user.ts", "export class User { name: string; }")?;
    test.write_file("src/index.ts", "export function boot(): void {}")?;
    test.write_file("scripts/build.ts", "export function build(): void {}")?;

    let output = test.compile_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "✓ Documented 2 source files\n");

    assert_eq!(
        test.read_file("src/models/user.jsdoc")?,
        "/**\n * @class User\n */\n\n/**\n * @member {string} name\n * @memberof User\n * @instance\n */"
    );
    assert_eq!(
        test.read_file("src/index.jsdoc")?,
        "/**\n * @function boot\n */"
    );
    assert!(!test.root().join("scripts/build.jsdoc").exists());

    Ok(())
}

#[test]
fn test_compile_skips_test_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/queue.ts", "export class Queue {}")?;
    test.write_file("src/queue.test.ts", "export class QueueTest {}")?;

    let output = test.compile_command().output()?;
    assert!(output.status.success());
    assert!(test.root().join("src/queue.jsdoc").exists());
    assert!(!test.root().join("src/queue.test.jsdoc").exists());

    Ok(())
}

#[test]
fn test_compile_reports_failed_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/good.ts", "export class Good {}")?;
    test.write_file("src/bad.ts", "type Point = { x: number };")?;

    let output = test.compile_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("cannot name anonymous type"));
    assert!(stdout_of(&output).contains("Documented 1 of 2 source files, 1 failed"));

    assert!(test.root().join("src/good.jsdoc").exists());
    assert!(!test.root().join("src/bad.jsdoc").exists());

    Ok(())
}

#[test]
fn test_compile_explicit_files_with_out_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/a.ts", "export class A {}")?;
    test.write_file("lib/b.ts", "export class B {}")?;

    let output = test
        .compile_command()
        .args(["lib/a.ts", "lib/b.ts", "--out-file", "docs/api.jsdoc"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    assert_eq!(
        test.read_file("docs/api.jsdoc")?,
        "/**\n * @class A\n */\n\n/**\n * @class B\n */"
    );
    assert!(!test.root().join("lib/a.jsdoc").exists());

    Ok(())
}

#[test]
fn test_compile_uses_config_out_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tsjsdocrc.json",
        r#"{
        "includes": ["lib/**/*.ts"],
        "ignores": ["**/generated/**"],
        "outDir": "out"
    }"#,
    )?;
    test.write_file("lib/store.ts", "export enum Mode { Read, Write }")?;
    test.write_file("lib/generated/api.ts", "export class Api {}")?;

    let output = test.compile_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    assert_eq!(
        test.read_file("out/store.jsdoc")?,
        "/**\n * @enum Mode\n * @property Read\n * @property Write\n */"
    );
    assert!(!test.root().join("out/api.jsdoc").exists());

    Ok(())
}

#[test]
fn test_compile_with_no_matching_files() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.compile_command().output()?;
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("no source files matched"));

    Ok(())
}

#[test]
fn test_compile_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".tsjsdocrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.compile_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}
