//! Command implementations.

mod annotate;
mod check;
mod fix;

pub use annotate::AnnotateCommand;
pub use check::CheckCommand;
pub use fix::FixCommand;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_reports, DirReport, Summary};

/// Print the reports and log the totals.
fn report(reports: &[DirReport], format: OutputFormat) -> Result<Summary, CliError> {
    print_reports(reports, format)
        .map_err(|e| CliError::io("failed to write output", None, e))?;

    let summary = Summary::of(reports);
    tracing::info!(
        dirs = summary.dirs,
        findings = summary.findings,
        written = summary.written,
        failed = summary.failed,
        "done"
    );

    Ok(summary)
}

/// Failure for a run where some directories could not be processed.
fn failures(summary: &Summary) -> Result<(), CliError> {
    if summary.failed > 0 {
        return Err(CliError::Failed {
            message: format!(
                "{} of {} test directories could not be processed",
                summary.failed, summary.dirs
            ),
        });
    }
    Ok(())
}
