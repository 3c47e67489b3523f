use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::CompileCommand;
use super::super::exit_status::ExitStatus;
use super::super::options::resolve_config;
use super::super::report::print_compile_summary;
use super::super::scan::scan_files;
use crate::config::Config;
use crate::core::typing::Program;
use crate::core::walker;

pub fn compile(cmd: CompileCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let config = resolve_config(&cmd.common)?;

    let mut options = config.compiler_options();
    if let Some(out_dir) = cmd.out_dir {
        options.out_dir = Some(out_dir);
    }
    if let Some(out_file) = cmd.out_file {
        options.out_file = Some(out_file);
    }

    let files = if cmd.files.is_empty() {
        discover_files(&config, cmd.source_root.as_deref(), verbose)
    } else {
        cmd.files
    };

    if files.is_empty() {
        eprintln!(
            "{} no source files matched the configured includes",
            "warning:".bold().yellow()
        );
        return Ok(ExitStatus::Success);
    }

    let program = Program::from_paths(options, &files);
    let summary = walker::compile(&program).context("Failed to write documentation output")?;
    print_compile_summary(&summary, files.len(), verbose);

    Ok(ExitStatus::for_compile(&summary))
}

fn discover_files(config: &Config, source_root: Option<&Path>, verbose: bool) -> Vec<PathBuf> {
    let base_dir = source_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.source_root));
    let result = scan_files(
        &base_dir,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
        verbose,
    );
    if result.skipped_count > 0 && verbose {
        eprintln!(
            "{} {} path(s) could not be accessed",
            "warning:".bold().yellow(),
            result.skipped_count
        );
    }
    result.files
}
