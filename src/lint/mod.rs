//! API Design Linting
//!
//! Enforces naming and completeness conventions on a single document.
//!
//! ## Rules
//! 1. **path-naming** (warning): static path segments must be kebab-case
//! 2. **missing-operation-id** (error): every operation needs an `operationId`
//! 3. **field-naming** (warning): fields of the success response (`200`, else
//!    `201`) must be snake_case
//! 4. **missing-version** (error): `info.version` must be set

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::document::{Document, Operation};
use crate::error::Result;
use crate::finding::{Finding, FindingKind, Severity};

/// Response codes whose body schema is checked for field naming, in priority order
const SUCCESS_CODES: [&str; 2] = ["200", "201"];

/// The design linter
pub struct ApiLinter {
    /// Field names must not contain an ASCII capital
    field_uppercase: Regex,
}

impl Default for ApiLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiLinter {
    pub fn new() -> Self {
        Self {
            field_uppercase: Regex::new(r"[A-Z]").expect("static pattern"),
        }
    }

    /// Lint a document
    pub fn lint(&self, doc: &Document) -> Vec<Finding> {
        let mut issues = Vec::new();

        for (path, item) in doc.paths().iter() {
            self.lint_path_segments(path, &mut issues);

            for (method, op) in item.operations() {
                let location = format!("{} {}", method.to_uppercase(), path);
                self.lint_operation(&op, &location, &mut issues);
            }
        }

        if doc.version().is_none() {
            push(
                &mut issues,
                Finding::new(
                    Severity::Error,
                    FindingKind::MissingVersion,
                    "info.version",
                    "API version required",
                ),
            );
        }

        debug!(count = issues.len(), "lint complete");
        issues
    }

    fn lint_path_segments(&self, path: &str, issues: &mut Vec<Finding>) {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty() && !s.starts_with('{'));

        for segment in segments {
            if segment.chars().any(char::is_uppercase) || segment.contains('_') {
                push(
                    issues,
                    Finding::new(
                        Severity::Warning,
                        FindingKind::PathNaming,
                        path,
                        format!("\"{}\" should be kebab-case", segment),
                    ),
                );
            }
        }
    }

    fn lint_operation(&self, op: &Operation<'_>, location: &str, issues: &mut Vec<Finding>) {
        if !op.has_operation_id() {
            push(
                issues,
                Finding::new(
                    Severity::Error,
                    FindingKind::MissingOperationId,
                    location,
                    "Missing operationId",
                ),
            );
        }

        let responses = op.responses();
        let success = SUCCESS_CODES
            .iter()
            .find_map(|code| responses.get(code))
            .unwrap_or_default();

        for (field, _) in success.schema().properties() {
            if self.field_uppercase.is_match(field) || field.contains('-') {
                push(
                    issues,
                    Finding::new(
                        Severity::Warning,
                        FindingKind::FieldNaming,
                        format!("{}.{}", location, field),
                        format!("\"{}\" should be snake_case", field),
                    ),
                );
            }
        }
    }
}

fn push(issues: &mut Vec<Finding>, finding: Finding) {
    debug!(kind = %finding.kind, location = %finding.location, "lint issue");
    issues.push(finding);
}

/// Lint a document with the default rules
pub fn lint_document(doc: &Document) -> Vec<Finding> {
    ApiLinter::new().lint(doc)
}

fn is_spec_file(path: &Path) -> bool {
    path.extension()
        .map(|x| {
            let x = x.to_string_lossy().to_ascii_lowercase();
            x == "json" || x == "yaml" || x == "yml"
        })
        .unwrap_or(false)
}

/// Lint every JSON/YAML document in a directory
///
/// Returns one `(relative path, outcome)` entry per document that has at
/// least one finding or fails to load, in file-name order. A load failure is
/// carried as the `Err` outcome so the caller can fail the run.
pub fn lint_specs(spec_dir: &Path) -> Vec<(PathBuf, Result<Vec<Finding>>)> {
    let linter = ApiLinter::new();
    let mut results = Vec::new();

    for entry in walkdir::WalkDir::new(spec_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_spec_file(e.path()))
    {
        let path = entry.path();
        let rel = path
            .strip_prefix(spec_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());

        match Document::from_path(path) {
            Ok(doc) => {
                let issues = linter.lint(&doc);
                if !issues.is_empty() {
                    results.push((rel, Ok(issues)));
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load document");
                results.push((rel, Err(e)));
            }
        }
    }

    results
}
