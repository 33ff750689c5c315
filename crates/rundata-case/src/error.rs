//! Errors raised while reconciling one test directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Which input a parse error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseSource {
    /// The specification document heading.
    Markdown,
    /// The generated declarations file.
    Rundata,
}

impl fmt::Display for ParseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("markdown"),
            Self::Rundata => f.write_str("rundata"),
        }
    }
}

/// Reconciliation errors. All of them abort the session for one directory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The specification document does not exist.
    #[error("specification document not found: {}", path.display())]
    NotFound {
        /// Where the document was expected.
        path: PathBuf,
    },

    /// The document heading or the declarations file could not be read.
    #[error("cannot parse {origin}{}: {message}", display_path(path))]
    Parse {
        /// Which input failed.
        origin: ParseSource,
        /// File the text came from, once known.
        path: Option<PathBuf>,
        /// What was wrong, including the offending text.
        message: String,
    },

    /// The declarations file cannot be produced (no fix yet, no package).
    #[error("cannot render declarations: {0}")]
    Render(String),

    /// Any other filesystem failure.
    #[error(transparent)]
    Fs(#[from] rundata_common_core::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn parse(origin: ParseSource, message: impl Into<String>) -> Self {
        Self::Parse {
            origin,
            path: None,
            message: message.into(),
        }
    }

    /// Attach the file a parse error was read from.
    pub fn at(self, file: &Path) -> Self {
        match self {
            Self::Parse { origin, message, .. } => Self::Parse {
                origin,
                path: Some(file.to_path_buf()),
                message,
            },
            other => other,
        }
    }

    /// Stable code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::Parse {
                origin: ParseSource::Markdown,
                ..
            } => "MARKDOWN_PARSE_ERROR",
            Self::Parse {
                origin: ParseSource::Rundata,
                ..
            } => "RUNDATA_PARSE_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Fs(e) => e.code().as_str(),
        }
    }

    /// Source of a parse error, if this is one.
    pub fn parse_source(&self) -> Option<ParseSource> {
        match self {
            Self::Parse { origin, .. } => Some(*origin),
            _ => None,
        }
    }
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, Error>;
