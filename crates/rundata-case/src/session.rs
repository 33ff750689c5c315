//! Per-directory reconciliation: load, check, fix, write.

use std::fmt;
use std::path::{Path, PathBuf};

use rundata_common_config::{LayoutConfig, RundataConfig};
use rundata_common_fs::DEFAULT_MAX_FILE_SIZE;
use serde::Serialize;
use tracing::{debug, info};

use crate::declarations::parse_declarations;
use crate::error::{Error, Result};
use crate::markdown::parse_document;
use crate::package::resolve_package;
use crate::record::{generate_uuid, normalize_uuid, Record};
use crate::render::Renderer;

/// One advisory drift message from [`Session::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// There is no declarations file to compare against.
    NoDeclarations,
    /// The declared plan id differs from the document heading.
    PlanIdMismatch {
        /// Plan id in the document.
        document: String,
        /// Plan id in the declarations.
        declarations: String,
    },
    /// The declared description differs from the document heading.
    DescriptionMismatch {
        /// Description in the document.
        document: String,
        /// Description in the declarations.
        declarations: String,
    },
    /// The declarations carry no test uuid.
    MissingUuid,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeclarations => f.write_str("no recorded declarations"),
            Self::PlanIdMismatch { document, declarations } => write!(
                f,
                "test plan id mismatch: document has {document:?}, declarations have {declarations:?}"
            ),
            Self::DescriptionMismatch { document, declarations } => write!(
                f,
                "test description mismatch: document has {document:?}, declarations have {declarations:?}"
            ),
            Self::MissingUuid => f.write_str("declarations have no test uuid"),
        }
    }
}

/// Reconciliation state for one test directory.
#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
    declarations_path: PathBuf,
    package: Option<String>,
    from_document: Record,
    from_declarations: Option<Record>,
    corrected: Option<Record>,
}

impl Session {
    /// Directory this session reconciles.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the declarations file, whether or not it exists yet.
    pub fn declarations_path(&self) -> &Path {
        &self.declarations_path
    }

    /// Package name for the regenerated file, if one was found.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Plan id and description from the document heading.
    pub fn from_document(&self) -> &Record {
        &self.from_document
    }

    /// Record from the declarations file, if it exists.
    pub fn from_declarations(&self) -> Option<&Record> {
        self.from_declarations.as_ref()
    }

    /// Record computed by [`Session::fix`], if it has run.
    pub fn corrected(&self) -> Option<&Record> {
        self.corrected.as_ref()
    }

    /// Compare the document against the recorded declarations.
    ///
    /// With no declarations at all this is a single finding. Otherwise the
    /// document decides plan id and description, and the uuid is only checked
    /// for being present. Malformed uuids never reach here: loading rejects
    /// them.
    pub fn check(&self) -> Vec<Finding> {
        let Some(declared) = &self.from_declarations else {
            return vec![Finding::NoDeclarations];
        };

        let mut findings = Vec::new();
        if declared.plan_id != self.from_document.plan_id {
            findings.push(Finding::PlanIdMismatch {
                document: self.from_document.plan_id.clone(),
                declarations: declared.plan_id.clone(),
            });
        }
        if declared.description != self.from_document.description {
            findings.push(Finding::DescriptionMismatch {
                document: self.from_document.description.clone(),
                declarations: declared.description.clone(),
            });
        }

        if normalize_uuid(&declared.uuid).is_empty() {
            findings.push(Finding::MissingUuid);
        }
        findings
    }

    /// Compute the corrected record.
    ///
    /// Plan id and description come from the document. An existing uuid is
    /// kept in canonical form; a new one is generated only when none is
    /// recorded.
    pub fn fix(&mut self) -> &Record {
        let existing = self
            .from_declarations
            .as_ref()
            .map(|r| normalize_uuid(&r.uuid))
            .filter(|uuid| !uuid.is_empty());

        let uuid = match existing {
            Some(uuid) => uuid,
            None => {
                let uuid = generate_uuid();
                debug!(dir = %self.dir.display(), %uuid, "generated test uuid");
                uuid
            }
        };

        self.corrected.insert(Record {
            plan_id: self.from_document.plan_id.clone(),
            description: self.from_document.description.clone(),
            uuid,
        })
    }
}

/// Loads and persists sessions for a fixed file layout.
#[derive(Debug, Clone)]
pub struct Reconciler {
    layout: LayoutConfig,
    renderer: Renderer,
}

impl Reconciler {
    /// Reconciler for the layout and render settings in `config`.
    pub fn new(config: &RundataConfig) -> Self {
        Self {
            layout: config.layout.clone(),
            renderer: Renderer::new(&config.render),
        }
    }

    /// File layout this reconciler reads and writes.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Read the document, the declarations file and the package name in `dir`.
    pub fn load(&self, dir: impl AsRef<Path>) -> Result<Session> {
        let dir = dir.as_ref();

        let document_path = dir.join(&self.layout.document);
        let document = rundata_common_fs::read_to_string(&document_path, DEFAULT_MAX_FILE_SIZE)
            .map_err(|e| {
                if e.is_not_found() {
                    Error::NotFound {
                        path: document_path.clone(),
                    }
                } else {
                    Error::Fs(e)
                }
            })?;
        let from_document = parse_document(&document).map_err(|e| e.at(&document_path))?;
        debug!(file = %document_path.display(), plan_id = %from_document.plan_id, "parsed document");

        let declarations_path = dir.join(&self.layout.declarations);
        let declarations =
            rundata_common_fs::read_optional(&declarations_path, DEFAULT_MAX_FILE_SIZE)?;
        let from_declarations = parse_declarations(declarations.as_deref())
            .map_err(|e| e.at(&declarations_path))?;
        debug!(
            file = %declarations_path.display(),
            present = from_declarations.is_some(),
            "parsed declarations"
        );

        let package = resolve_package(dir, &self.layout)?;

        Ok(Session {
            dir: dir.to_path_buf(),
            declarations_path,
            package,
            from_document,
            from_declarations,
            corrected: None,
        })
    }

    /// Render the corrected record of `session` without writing it.
    pub fn render(&self, session: &Session) -> Result<String> {
        let corrected = session
            .corrected
            .as_ref()
            .ok_or_else(|| Error::Render("corrected record not computed; run fix first".into()))?;
        let package = session.package.as_deref().ok_or_else(|| {
            Error::Render(format!(
                "no package clause found in {}",
                session.dir.display()
            ))
        })?;
        Ok(self.renderer.render(package, corrected))
    }

    /// Replace the declarations file with the corrected record.
    pub fn write(&self, session: &Session) -> Result<()> {
        let text = self.render(session)?;
        rundata_common_fs::write_string_atomic(&session.declarations_path, &text)?;
        info!(file = %session.declarations_path.display(), "wrote declarations");
        Ok(())
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(&RundataConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::is_canonical_uuid;
    use test_case::test_case;

    const UUID: &str = "123e4567-e89b-42d3-8456-426614174000";

    fn session(document: Record, declarations: Option<Record>) -> Session {
        Session {
            dir: PathBuf::from("feature/foo/tests/foo_test"),
            declarations_path: PathBuf::from("feature/foo/tests/foo_test/rundata_test.go"),
            package: Some("foo_functional_test".into()),
            from_document: document,
            from_declarations: declarations,
            corrected: None,
        }
    }

    fn doc() -> Record {
        Record::new("XX-1.1", "Foo Functional Test", "")
    }

    #[test_case(Some(Record::new("XX-1.1", "Foo Functional Test", UUID)), 0 ; "good")]
    #[test_case(Some(Record::new("YY-1.1", "Description from Test", "123e4567-e89b-12d3-a456-426614174000")), 2 ; "allbad")]
    #[test_case(Some(Record::new("YY-1.1", "Foo Functional Test", UUID)), 1 ; "plan id only")]
    #[test_case(Some(Record::new("XX-1.1", "foo functional test", UUID)), 1 ; "description is case sensitive")]
    #[test_case(Some(Record::new("XX-1.1", "Foo Functional Test", "")), 1 ; "missing uuid")]
    #[test_case(Some(Record::new("XX-1.1", "Foo Functional Test", "urn:uuid:123e4567-e89b-42d3-8456-426614174000")), 0 ; "urn uuid accepted")]
    #[test_case(Some(Record::new("XX-1.1", "Foo Functional Test", "{123E4567-E89B-42D3-8456-426614174000}")), 0 ; "braced uppercase uuid accepted")]
    #[test_case(Some(Record::new("XX-1.1", "Foo Functional Test", "urn:uuid:")), 1 ; "bare urn prefix is missing")]
    #[test_case(Some(Record::default()), 3 ; "empty block")]
    #[test_case(None, 1 ; "no declarations")]
    fn test_check_counts(declarations: Option<Record>, want: usize) {
        let findings = session(doc(), declarations).check();
        assert_eq!(findings.len(), want, "findings: {findings:?}");
    }

    #[test]
    fn test_check_no_declarations_is_single_finding() {
        assert_eq!(session(doc(), None).check(), vec![Finding::NoDeclarations]);
    }

    #[test]
    fn test_check_reports_both_values() {
        let findings = session(doc(), Some(Record::new("YY-1.1", "Foo Functional Test", UUID))).check();
        assert_eq!(
            findings,
            vec![Finding::PlanIdMismatch {
                document: "XX-1.1".into(),
                declarations: "YY-1.1".into(),
            }]
        );
        assert_eq!(
            findings[0].to_string(),
            "test plan id mismatch: document has \"XX-1.1\", declarations have \"YY-1.1\""
        );
    }

    #[test]
    fn test_fix_generates_uuid() {
        let mut s = session(doc(), None);
        let fixed = s.fix().clone();
        assert_eq!(fixed.plan_id, "XX-1.1");
        assert_eq!(fixed.description, "Foo Functional Test");
        assert!(is_canonical_uuid(&fixed.uuid));
        assert_eq!(s.corrected(), Some(&fixed));
    }

    #[test]
    fn test_fix_generates_uuid_when_empty() {
        let mut s = session(doc(), Some(Record::new("XX-1.1", "Foo Functional Test", "  ")));
        assert!(is_canonical_uuid(&s.fix().uuid));
    }

    #[test]
    fn test_fix_preserves_and_normalizes_uuid() {
        let mut s = session(
            doc(),
            Some(Record::new("YY-1.1", "Old", format!("urn:uuid:{UUID}"))),
        );
        assert_eq!(s.fix(), &Record::new("XX-1.1", "Foo Functional Test", UUID));
    }

    #[test]
    fn test_fix_canonicalizes_uuid() {
        let mut s = session(
            doc(),
            Some(Record::new("XX-1.1", "Foo Functional Test", "123E4567E89B42D38456426614174000")),
        );
        assert_eq!(s.fix().uuid, UUID);
    }

    #[test]
    fn test_fix_is_stable_across_runs() {
        let mut s = session(doc(), Some(Record::new("XX-1.1", "Foo Functional Test", UUID)));
        let first = s.fix().clone();
        let second = s.fix().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_requires_fix_and_package() {
        let reconciler = Reconciler::default();
        let mut s = session(doc(), None);
        assert!(matches!(reconciler.render(&s), Err(Error::Render(_))));

        s.fix();
        s.package = None;
        let err = reconciler.render(&s).unwrap_err();
        assert!(err.to_string().contains("no package clause"));
    }

    #[test]
    fn test_finding_serializes_with_kind() {
        let json = serde_json::to_value(Finding::MissingUuid).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "missing_uuid" }));
    }
}
