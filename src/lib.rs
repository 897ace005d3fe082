//! SpecGuard
//!
//! Breaking-change detection, design linting and consistency scoring for
//! API schema documents, meant to run in CI and block merges that would
//! break API consumers.
//!
//! ## Features
//!
//! - **Structural Diff**: classifies every path, method, parameter and
//!   response-schema delta between two versions as breaking, deprecation or
//!   compatible
//! - **Design Lint**: kebab-case paths, snake_case fields, operation ids and
//!   a declared API version
//! - **Scoring**: a 0-100 consistency score derived from lint findings
//! - **Reports**: table, JSON, GitHub annotations and Markdown output
//!
//! ## Architecture
//!
//! ```text
//! Document::from_path ──► diff(old, new) ──┐
//!                    └──► lint(doc) ───────┼──► Renderer::render ──► stdout
//!                          └──► score(doc) ┘
//! ```
//!
//! The three core entry points are pure: they never fail, never mutate their
//! inputs, and return the same findings in the same order for the same input.
//!
//! ```
//! use specguard::{diff, has_breaking, Document};
//!
//! let old = Document::from_json_str(r#"{"paths": {"/orders": {}, "/users": {}}}"#).unwrap();
//! let new = Document::from_json_str(r#"{"paths": {"/users": {}}}"#).unwrap();
//!
//! let findings = diff(&old, &new);
//! assert!(has_breaking(&findings));
//! assert_eq!(findings[0].kind.as_str(), "endpoint-removed");
//! ```

pub mod compatibility;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod finding;
pub mod lint;
pub mod report;
pub mod score;

pub use compatibility::diff_documents;
pub use config::SpecGuardConfig;
pub use document::{extract_schema, Document, DocumentFormat};
pub use engine::{diff_files, DiffEngine, EngineRegistry};
pub use error::{Result, SpecError};
pub use finding::{has_breaking, Finding, FindingKind, Severity, Summary};
pub use lint::{lint_document, lint_specs, ApiLinter};
pub use report::{renderer_for, OutputFormat, Renderer, ReportKind};
pub use score::{score_document, ScoreBand};

/// Breaking, deprecation and compatible changes from `old` to `new`
pub fn diff(old: &Document, new: &Document) -> Vec<Finding> {
    diff_documents(old, new)
}

/// Design-rule findings for one document
pub fn lint(doc: &Document) -> Vec<Finding> {
    lint_document(doc)
}

/// Consistency score in `0..=100`
pub fn score(doc: &Document) -> u32 {
    score_document(doc)
}
