//! `rundata fix`

use std::path::PathBuf;

use clap::{Args, ValueHint};
use rundata_case::Reconciler;
use tracing::{debug, warn};

use crate::cli::CommandContext;
use crate::discover::find_test_dirs;
use crate::error::CliError;
use crate::output::DirReport;

/// Regenerate the declarations of every test that has drifted.
#[derive(Debug, Args)]
pub struct FixCommand {
    /// Directories to search for tests
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub roots: Vec<PathBuf>,

    /// Rewrite declarations even when they are already up to date
    #[arg(long)]
    pub force: bool,

    /// Print the regenerated declarations instead of writing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl FixCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let reconciler = Reconciler::new(&ctx.config);
        let dirs = find_test_dirs(&self.roots, reconciler.layout())?;
        if dirs.is_empty() {
            warn!("no test directories found");
        }

        let reports: Vec<_> = dirs
            .into_iter()
            .map(|dir| self.fix_dir(&reconciler, dir))
            .collect();

        let summary = super::report(&reports, ctx.format)?;
        super::failures(&summary)
    }

    fn fix_dir(&self, reconciler: &Reconciler, dir: PathBuf) -> DirReport {
        let mut report = DirReport::new(dir);

        let mut session = match reconciler.load(&report.dir) {
            Ok(session) => session,
            Err(e) => {
                warn!(dir = %report.dir.display(), error = %e, "cannot load test directory");
                report.error = Some((&e).into());
                return report;
            }
        };

        report.findings = session.check();
        if report.findings.is_empty() && !self.force {
            debug!(dir = %report.dir.display(), "up to date");
            return report;
        }

        report.corrected = Some(session.fix().clone());

        let result = if self.dry_run {
            reconciler.render(&session).map(|text| report.preview = Some(text))
        } else {
            reconciler.write(&session).map(|()| report.written = true)
        };
        if let Err(e) = result {
            warn!(dir = %report.dir.display(), error = %e, "cannot regenerate declarations");
            report.error = Some((&e).into());
        }
        report
    }
}
