//! Error types shared by the rundata crates.

use std::fmt;

use thiserror::Error;

/// Stable error code attached to filesystem failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// The file does not exist.
    pub const FILE_NOT_FOUND: Self = Self("FILE_NOT_FOUND");
    /// The file exists but could not be read (permissions, size, encoding).
    pub const FILE_READ_ERROR: Self = Self("FILE_READ_ERROR");
    /// The file could not be created, written or renamed into place.
    pub const FILE_WRITE_ERROR: Self = Self("FILE_WRITE_ERROR");

    /// The code as a string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The main error type for rundata operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem error.
    #[error("{message}")]
    FileSystem {
        /// Stable code for the failure.
        code: ErrorCode,
        /// Human-readable description.
        message: String,
        /// File the failure concerns, if any.
        path: Option<String>,
        /// Underlying I/O error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FileSystem { code, .. } => *code,
        }
    }

    /// Whether this error reports a missing file.
    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::FILE_NOT_FOUND
    }

    /// Path associated with the error, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::FileSystem { path, .. } => path.as_deref(),
        }
    }
}

/// Result type alias using rundata's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = Error::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: "file not found: README.md".into(),
            path: Some("README.md".into()),
            source: None,
        };
        assert_eq!(err.code(), ErrorCode::FILE_NOT_FOUND);
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some("README.md"));
        assert_eq!(err.to_string(), "file not found: README.md");

        let err = Error::FileSystem {
            code: ErrorCode::FILE_WRITE_ERROR,
            message: "failed to write".into(),
            path: None,
            source: None,
        };
        assert_eq!(err.code().as_str(), "FILE_WRITE_ERROR");
        assert!(!err.is_not_found());
    }
}
