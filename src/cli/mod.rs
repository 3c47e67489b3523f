//! Command-line interface layer.
//!
//! Loads the configuration, applies flag overrides and hands the work to the
//! engine in `core`. Output formatting lives in `report`.

use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod options;
mod report;
mod run;
mod scan;

pub use args::{Arguments, Command, CommonArgs, CompileCommand, ExtractCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = run::run(args)?;
    Ok(status.into())
}
