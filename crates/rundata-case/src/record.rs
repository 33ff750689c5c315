//! The metadata record shared by every parser and the renderer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const URN_PREFIX: &str = "urn:uuid:";

/// Test-case metadata: plan id, description and unique id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Test plan identifier, e.g. `XX-1.1`.
    pub plan_id: String,
    /// Human-readable description.
    pub description: String,
    /// Canonical UUID with no scheme prefix. Empty when unknown.
    pub uuid: String,
}

impl Record {
    /// Build a record from its three fields.
    pub fn new(
        plan_id: impl Into<String>,
        description: impl Into<String>,
        uuid: impl Into<String>,
    ) -> Self {
        Self {
            plan_id: plan_id.into(),
            description: description.into(),
            uuid: uuid.into(),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.plan_id.is_empty() && self.description.is_empty() && self.uuid.is_empty()
    }
}

fn strip_urn(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..URN_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(URN_PREFIX) => {
            trimmed[URN_PREFIX.len()..].trim()
        }
        _ => trimmed,
    }
}

/// Canonical form of a declared uuid.
///
/// Whitespace and any `urn:uuid:` prefix are stripped, and every form the
/// `uuid` crate parses (braced, simple, uppercase) becomes lowercase
/// hyphenated. Text that is not a uuid comes back stripped but otherwise
/// unchanged.
pub fn normalize_uuid(raw: &str) -> String {
    let stripped = strip_urn(raw);
    match Uuid::try_parse(stripped) {
        Ok(id) => id.hyphenated().to_string(),
        Err(_) => stripped.to_string(),
    }
}

/// Whether a declared uuid is blank or parses as a uuid in some accepted form.
pub fn is_acceptable_uuid(raw: &str) -> bool {
    let stripped = strip_urn(raw);
    stripped.is_empty() || Uuid::try_parse(stripped).is_ok()
}

/// Whether `s` is a UUID in canonical hyphenated form.
pub fn is_canonical_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}

/// A fresh random (version 4) UUID in canonical form.
pub fn generate_uuid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
