//! Machine-readable JSON output

use serde::Serialize;

use super::{Renderer, ReportKind};
use crate::finding::{Finding, Summary};

#[derive(Serialize)]
struct StructuredReport<'a> {
    summary: DiffCounts,
    changes: Vec<ChangeEntry<'a>>,
}

#[derive(Serialize)]
struct DiffCounts {
    breaking: usize,
    deprecation: usize,
    compatible: usize,
}

#[derive(Serialize)]
struct ChangeEntry<'a> {
    #[serde(rename = "type")]
    severity: &'static str,
    path: &'a str,
    description: String,
    change_type: &'static str,
}

#[derive(Serialize)]
struct LintReport<'a> {
    summary: LintCounts,
    issues: Vec<IssueEntry<'a>>,
}

#[derive(Serialize)]
struct LintCounts {
    error: usize,
    warning: usize,
}

#[derive(Serialize)]
struct IssueEntry<'a> {
    level: &'static str,
    path: &'a str,
    description: String,
    rule: &'static str,
}

/// `{"summary": {...}, "changes": [...]}` report
///
/// Lint runs use `{"summary": {"error", "warning"}, "issues": [...]}`.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    kind: ReportKind,
}

impl JsonRenderer {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, findings: &[Finding]) -> String {
        let summary = Summary::from_findings(findings);
        match self.kind {
            ReportKind::Diff => to_pretty(&StructuredReport {
                summary: DiffCounts {
                    breaking: summary.breaking,
                    deprecation: summary.deprecation,
                    compatible: summary.compatible,
                },
                changes: findings
                    .iter()
                    .map(|f| ChangeEntry {
                        severity: f.severity.as_str(),
                        path: &f.location,
                        description: format!("{}: {}", f.kind, f.detail),
                        change_type: f.kind.as_str(),
                    })
                    .collect(),
            }),
            ReportKind::Lint => to_pretty(&LintReport {
                summary: LintCounts {
                    error: summary.error,
                    warning: summary.warning,
                },
                issues: findings
                    .iter()
                    .map(|f| IssueEntry {
                        level: f.severity.as_str(),
                        path: &f.location,
                        description: format!("{}: {}", f.kind, f.detail),
                        rule: f.kind.as_str(),
                    })
                    .collect(),
            }),
        }
    }
}

/// Flat array of findings, keyed the way the table columns are named
#[derive(Debug, Clone, Copy)]
pub struct RowsRenderer {
    kind: ReportKind,
}

impl RowsRenderer {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }
}

#[derive(Serialize)]
struct DiffRow<'a> {
    severity: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    location: &'a str,
    detail: &'a str,
}

#[derive(Serialize)]
struct LintRow<'a> {
    level: &'static str,
    rule: &'static str,
    location: &'a str,
    detail: &'a str,
}

impl Renderer for RowsRenderer {
    fn render(&self, findings: &[Finding]) -> String {
        match self.kind {
            ReportKind::Diff => to_pretty(
                &findings
                    .iter()
                    .map(|f| DiffRow {
                        severity: f.severity.as_str(),
                        kind: f.kind.as_str(),
                        location: &f.location,
                        detail: &f.detail,
                    })
                    .collect::<Vec<_>>(),
            ),
            ReportKind::Lint => to_pretty(
                &findings
                    .iter()
                    .map(|f| LintRow {
                        level: f.severity.as_str(),
                        rule: f.kind.as_str(),
                        location: &f.location,
                        detail: &f.detail,
                    })
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

fn to_pretty<T: Serialize>(value: &T) -> String {
    // Serializing plain structs of strings and integers cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}
