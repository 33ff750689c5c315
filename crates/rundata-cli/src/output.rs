//! Per-directory results and how they are printed.

use std::io::{self, Write};
use std::path::PathBuf;

use rundata_case::{Finding, Record};
use serde::Serialize;

use crate::cli::OutputFormat;

/// What happened to one test directory.
#[derive(Debug, Default, Serialize)]
pub struct DirReport {
    pub dir: PathBuf,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<Record>,
    pub written: bool,
    /// Declarations that `fix --dry-run` would have written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// A failure that stopped one directory from being processed.
#[derive(Debug, Clone, Serialize)]
pub struct ReportError {
    pub code: &'static str,
    pub message: String,
}

impl From<&rundata_case::Error> for ReportError {
    fn from(e: &rundata_case::Error) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

impl DirReport {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            ..Self::default()
        }
    }
}

/// Totals across a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub dirs: usize,
    pub findings: usize,
    pub written: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(reports: &[DirReport]) -> Self {
        Self {
            dirs: reports.len(),
            findings: reports.iter().map(|r| r.findings.len()).sum(),
            written: reports.iter().filter(|r| r.written).count(),
            failed: reports.iter().filter(|r| r.error.is_some()).count(),
        }
    }
}

/// Print reports to stdout (and errors to stderr in text mode).
pub fn print_reports(reports: &[DirReport], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, reports)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for line in text_lines(reports) {
                writeln!(out, "{line}")?;
            }
            for report in reports {
                if let Some(error) = &report.error {
                    eprintln!("{}: error: {}", report.dir.display(), error.message);
                }
            }
        }
    }
    out.flush()
}

fn text_lines(reports: &[DirReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        for finding in &report.findings {
            lines.push(format!("{}: {finding}", report.dir.display()));
        }
        if report.written {
            lines.push(format!("{}: updated", report.dir.display()));
        }
        if let Some(preview) = &report.preview {
            lines.push(format!("{}: would write:", report.dir.display()));
            lines.extend(preview.lines().map(|l| format!("    {l}")));
        }
    }
    lines
}
