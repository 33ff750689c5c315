//! Converts `go vet -json` style lint output into GitHub Actions annotations.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One diagnostic reported by an analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct Diagnostic {
    /// Analyzer category, used as the annotation title.
    #[serde(default)]
    pub category: Option<String>,
    /// Position as `file:line:col`.
    pub posn: String,
    pub message: String,
}

/// Lint output keyed by package, then analyzer.
pub type LintOutput = BTreeMap<String, BTreeMap<String, Vec<Diagnostic>>>;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("invalid lint JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("diagnostic position is not file:line:col: {0:?}")]
    Position(String),
}

/// Source position of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<'a> {
    pub file: &'a str,
    pub line: u32,
    pub col: u32,
}

/// Split `file:line:col`, allowing colons inside the file name.
pub fn parse_position(posn: &str) -> Result<Position<'_>, LintError> {
    let bad = || LintError::Position(posn.to_string());
    let mut parts = posn.rsplitn(3, ':');
    let col = parts.next().and_then(|c| c.parse().ok()).ok_or_else(bad)?;
    let line = parts.next().and_then(|l| l.parse().ok()).ok_or_else(bad)?;
    let file = parts.next().filter(|f| !f.is_empty()).ok_or_else(bad)?;
    Ok(Position { file, line, col })
}

// Workflow commands treat these characters specially.
fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Render one `::error` line per diagnostic, in package and analyzer order.
///
/// A diagnostic with a category gets it as the annotation title.
pub fn annotations(json: &str) -> Result<Vec<String>, LintError> {
    let output: LintOutput = serde_json::from_str(json)?;

    let mut lines = Vec::new();
    for analyzers in output.values() {
        for diags in analyzers.values() {
            for diag in diags {
                let pos = parse_position(&diag.posn)?;
                let title = match diag.category.as_deref() {
                    Some(category) if !category.is_empty() => {
                        format!("title={},", escape_property(category))
                    }
                    _ => String::new(),
                };
                lines.push(format!(
                    "::error {title}file={},line={},col={}::{}",
                    escape_property(pos.file),
                    pos.line,
                    pos.col,
                    escape_data(&diag.message)
                ));
            }
        }
    }
    Ok(lines)
}
