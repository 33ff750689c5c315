//! Configuration types for rundata.
//!
//! This crate provides the configuration used by the `rundata` tool, read
//! from `.rundata.yaml` files. Every field has a default matching the
//! featureprofiles repository layout, so a missing file is not an error.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
