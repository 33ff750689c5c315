//! Rundata CLI library.
//!
//! Argument parsing, directory discovery and the command implementations
//! behind the `rundata` binary.

pub mod cli;
pub mod commands;
pub mod discover;
pub mod error;
pub mod lint;
pub mod output;

pub use error::CliError;
