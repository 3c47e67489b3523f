//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Print the synthesized comments of one file
//! - `compile`: Write a `.jsdoc` output for every source file
//! - `init`: Initialize the tsjsdoc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Compile(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the documentation commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Target language version: ES3, ES5, ES6/ES2015 or Latest (overrides config file)
    #[arg(long)]
    pub target: Option<String>,

    /// Module kind: commonjs or amd (overrides config file)
    #[arg(long)]
    pub module: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// TypeScript source file to document
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CompileCommand {
    /// Source files to document (default: files matched by the config `includes`)
    pub files: Vec<PathBuf>,

    /// Directory receiving the `.jsdoc` outputs (overrides config file)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Single file receiving every output, concatenated (overrides config file)
    #[arg(long)]
    pub out_file: Option<PathBuf>,

    /// Source root directory the `includes` are resolved against (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the synthesized JSDoc comments of one TypeScript file
    Extract(ExtractCommand),
    /// Write a .jsdoc file next to (or instead of) every TypeScript source
    Compile(CompileCommand),
    /// Initialize a new .tsjsdocrc.json configuration file
    Init,
}
