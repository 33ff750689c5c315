//! Test-case metadata reconciliation.
//!
//! Every test directory states its plan id and description twice: in the
//! heading of its README and in a generated `rundata_test.go`. This crate
//! reads both, reports where they disagree, computes the canonical record
//! (keeping an existing test uuid, generating one only when none exists) and
//! regenerates the declarations file.
//!
//! ```no_run
//! use rundata_case::Reconciler;
//!
//! let reconciler = Reconciler::default();
//! let mut session = reconciler.load("feature/example/tests/foo_test")?;
//! for finding in session.check() {
//!     println!("{finding}");
//! }
//! session.fix();
//! reconciler.write(&session)?;
//! # Ok::<(), rundata_case::Error>(())
//! ```

pub mod declarations;
pub mod error;
pub mod markdown;
pub mod package;
pub mod quote;
pub mod record;
pub mod render;
pub mod session;

pub use declarations::parse_declarations;
pub use error::{Error, ParseSource, Result};
pub use markdown::parse_document;
pub use package::{parse_package, resolve_package};
pub use record::Record;
pub use render::Renderer;
pub use session::{Finding, Reconciler, Session};
