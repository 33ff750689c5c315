//! Reads the plan id and description from a README heading.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, ParseSource, Result};
use crate::record::Record;

// `# XX-1.1: Foo Functional Test`; the split happens at the first colon.
fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*#([^:]*):(.*)$").expect("heading pattern is valid"))
}

/// Parse the first non-blank line of a specification document.
///
/// Only the heading is inspected. The returned record has no uuid, since
/// documents never state one.
pub fn parse_document(text: &str) -> Result<Record> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(line) = text.lines().find(|l| !l.trim().is_empty()) else {
        return Err(Error::parse(ParseSource::Markdown, "missing markdown heading"));
    };

    let caps = heading_pattern()
        .captures(line)
        .ok_or_else(|| Error::parse(ParseSource::Markdown, format!("not a `# ID: Description` heading: {line}")))?;

    Ok(Record {
        plan_id: caps[1].trim().to_string(),
        description: caps[2].trim().to_string(),
        uuid: String::new(),
    })
}
