//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use rundata_common_config::{ConfigLoader, RundataConfig};

use crate::commands::{AnnotateCommand, CheckCommand, FixCommand};
use crate::error::CliError;

/// Keep test README headings and generated rundata declarations in sync.
#[derive(Debug, Parser)]
#[command(
    name = "rundata",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "RUNDATA_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report drift between documents and declarations
    Check(CheckCommand),

    /// Regenerate declarations from the documents
    Fix(FixCommand),

    /// Turn lint JSON into CI error annotations
    Annotate(AnnotateCommand),
}

impl Cli {
    /// Load configuration from `--config` or `.rundata.yaml` in the working directory.
    pub fn load_config(&self) -> Result<RundataConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        tracing::debug!(path = %loader.path().display(), "loading configuration");
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub fn execute(self, config: RundataConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match self.command {
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Fix(cmd) => cmd.execute(&ctx),
            Command::Annotate(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: RundataConfig,
    pub format: OutputFormat,
}
