//! `rundata annotate`

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueHint};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::lint::annotations;

/// Convert analyzer JSON output into `::error` workflow annotations.
#[derive(Debug, Args)]
pub struct AnnotateCommand {
    /// Lint output in JSON form
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

impl AnnotateCommand {
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        let json = std::fs::read_to_string(&self.file).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CliError::NotFound {
                    message: format!("lint output not found: {}", self.file.display()),
                    path: self.file.clone(),
                }
            } else {
                CliError::io(
                    format!("failed to read {}", self.file.display()),
                    Some(self.file.clone()),
                    e,
                )
            }
        })?;

        let lines = annotations(&json).map_err(|e| CliError::Failed {
            message: format!("{}: {e}", self.file.display()),
        })?;
        tracing::debug!(count = lines.len(), "converted diagnostics");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in &lines {
            writeln!(out, "{line}").map_err(|e| CliError::io("failed to write output", None, e))?;
        }
        Ok(())
    }
}
