use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr_of, stdout_of};

#[test]
fn test_extract_prints_comments() -> Result<()> {
    let test = CliTest::with_file(
        "src/shapes.ts",
        r#"
/** A drawable shape. */
export interface Shape {
    area(): number;
}

export class Circle implements Shape {
    constructor(public radius: number) {}
    area(): number { return Math.PI * this.radius ** 2; }
}
"#,
    )?;

    let output = test.extract_command("src/shapes.ts").output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        r#"/**
 * A drawable shape.
 * @interface Shape
 */

/**
 * @function area
 * @returns {number}
 * @memberof Shape
 * @instance
 */

/**
 * @class Circle
 * @implements Shape
 */

/**
 * @ctor
 * @memberof Circle
 * @param {number} radius
 */

/**
 * @function area
 * @returns {number}
 * @memberof Circle
 * @instance
 */
"#
    );

    Ok(())
}

#[test]
fn test_extract_honors_amd_module_name() -> Result<()> {
    let test = CliTest::with_file(
        "src/main.ts",
        "/// <amd-module name=\"app/main\"/>\nexport function start(): void {}\n",
    )?;

    let output = test
        .extract_command("src/main.ts")
        .args(["--module", "amd"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout_of(&output).contains(" * @memberof app/main"));

    Ok(())
}

#[test]
fn test_extract_unnamed_anonymous_type_fails() -> Result<()> {
    let test = CliTest::with_file("src/point.ts", "type Point = { x: number };")?;

    let output = test.extract_command("src/point.ts").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("cannot name anonymous type"));
    assert!(stdout_of(&output).is_empty());

    Ok(())
}

#[test]
fn test_extract_missing_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command("src/missing.ts").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).starts_with("Error: Failed to extract src/missing.ts"));

    Ok(())
}
