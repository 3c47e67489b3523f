use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::ExtractCommand;
use super::super::exit_status::ExitStatus;
use super::super::options::resolve_config;
use super::super::report::FAILURE_MARK;
use crate::core::walker::extract_file;
use crate::error::DocError;

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let config = resolve_config(&cmd.common)?;

    match extract_file(&cmd.file, config.compiler_options()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(ExitStatus::Success)
        }
        Err(err @ DocError::Io { .. }) => {
            Err(err).with_context(|| format!("Failed to extract {}", cmd.file.display()))
        }
        Err(err) => {
            eprintln!("{} {}", FAILURE_MARK.red(), err);
            Ok(ExitStatus::Failure)
        }
    }
}
