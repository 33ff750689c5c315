//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration for rundata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RundataConfig {
    /// Names of the files that make up one test directory.
    pub layout: LayoutConfig,
    /// Constants written into the generated declarations file.
    pub render: RenderConfig,
}

/// File layout of a test directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Hand-written specification document.
    pub document: String,
    /// Generated declarations file.
    pub declarations: String,
    /// Extension of ordinary source files, without the leading dot.
    pub source_extension: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            document: "README.md".to_string(),
            declarations: "rundata_test.go".to_string(),
            source_extension: "go".to_string(),
        }
    }
}

/// Rendering constants for the declarations file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Generator named in the "do not edit" banner.
    pub generator: String,
    /// Import path of the runtime metadata package.
    pub runtime_import: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generator: "go run tools/addrundata".to_string(),
            runtime_import: "github.com/openconfig/featureprofiles/internal/rundata".to_string(),
        }
    }
}
