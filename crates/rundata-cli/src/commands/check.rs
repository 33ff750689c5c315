//! `rundata check`

use std::path::PathBuf;

use clap::{Args, ValueHint};
use rundata_case::Reconciler;
use tracing::warn;

use crate::cli::CommandContext;
use crate::discover::find_test_dirs;
use crate::error::CliError;
use crate::output::DirReport;

/// Report drift between each test document and its declarations.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Directories to search for tests
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub roots: Vec<PathBuf>,
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let reconciler = Reconciler::new(&ctx.config);
        let dirs = find_test_dirs(&self.roots, reconciler.layout())?;
        if dirs.is_empty() {
            warn!("no test directories found");
        }

        let reports: Vec<_> = dirs
            .into_iter()
            .map(|dir| check_dir(&reconciler, dir))
            .collect();

        // Drift outranks load failures: any finding means exit 5.
        let summary = super::report(&reports, ctx.format)?;
        if summary.findings > 0 {
            return Err(CliError::Validation {
                message: format!(
                    "{} findings in {} test directories",
                    summary.findings, summary.dirs
                ),
            });
        }
        super::failures(&summary)
    }
}

fn check_dir(reconciler: &Reconciler, dir: PathBuf) -> DirReport {
    let mut report = DirReport::new(dir);
    match reconciler.load(&report.dir) {
        Ok(session) => report.findings = session.check(),
        Err(e) => {
            warn!(dir = %report.dir.display(), error = %e, "cannot load test directory");
            report.error = Some((&e).into());
        }
    }
    report
}
