//! Renders a record as the generated declarations file.

use rundata_common_config::RenderConfig;

use crate::declarations::{BLOCK_END, BLOCK_START, KEY_DESCRIPTION, KEY_PLAN_ID, KEY_UUID};
use crate::quote::quote;
use crate::record::Record;

/// Writes declarations files in the exact layout the scanner reads back.
#[derive(Debug, Clone)]
pub struct Renderer {
    generator: String,
    runtime_import: String,
}

impl Renderer {
    /// Renderer using the banner and import path from `config`.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            generator: config.generator.clone(),
            runtime_import: config.runtime_import.clone(),
        }
    }

    /// Render the complete file for `package`.
    pub fn render(&self, package: &str, record: &Record) -> String {
        let mut lines = vec![
            format!("// Code generated by {}; DO NOT EDIT.", self.generator),
            format!("package {package}"),
            String::new(),
            format!("import {}", quote(&self.runtime_import)),
            String::new(),
            BLOCK_START.to_string(),
        ];
        lines.extend(
            [
                (KEY_PLAN_ID, &record.plan_id),
                (KEY_DESCRIPTION, &record.description),
                (KEY_UUID, &record.uuid),
            ]
            .into_iter()
            .map(|(key, value)| format!("\trundata.{key} = {}", quote(value))),
        );
        lines.push(BLOCK_END.to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}
