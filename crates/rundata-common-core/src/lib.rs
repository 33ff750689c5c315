//! Core types shared by the rundata crates.

pub mod error;

pub use error::{Error, ErrorCode, Result};
