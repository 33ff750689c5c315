//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// CLI error type with enough context to pick an exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    /// Drift was found; the findings themselves were already printed.
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String, path: PathBuf },

    /// Some directories could not be reconciled.
    #[error("{message}")]
    Failed { message: String },
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Failed { .. } => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::Failed { .. } => 1,
        }
    }

    pub fn io(message: impl Into<String>, path: Option<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path,
        }
    }
}

impl From<rundata_common_config::ConfigError> for CliError {
    fn from(e: rundata_common_config::ConfigError) -> Self {
        Self::Config {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}
