//! GitHub Actions workflow annotations (`::error`, `::warning`, `::notice`)

use super::{Renderer, ReportKind};
use crate::finding::{Finding, Severity, Summary};

#[derive(Debug, Clone, Copy)]
pub struct GithubRenderer {
    kind: ReportKind,
}

impl GithubRenderer {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Breaking | Severity::Error => "error",
        Severity::Deprecation | Severity::Warning => "warning",
        Severity::Compatible => "notice",
    }
}

impl Renderer for GithubRenderer {
    fn render(&self, findings: &[Finding]) -> String {
        if findings.is_empty() {
            return match self.kind {
                ReportKind::Diff => "::notice ::No changes detected".to_string(),
                ReportKind::Lint => "::notice ::All design rules pass".to_string(),
            };
        }

        let mut lines: Vec<String> = findings
            .iter()
            .map(|f| {
                format!("::{} file={}::{}: {}", level(f.severity), f.location, f.kind, f.detail)
            })
            .collect();

        let summary = Summary::from_findings(findings);
        lines.push(match self.kind {
            ReportKind::Diff => format!(
                "::{} ::Summary: {} breaking, {} deprecation, {} compatible",
                if summary.breaking > 0 { "error" } else { "notice" },
                summary.breaking,
                summary.deprecation,
                summary.compatible
            ),
            ReportKind::Lint => format!(
                "::{} ::Summary: {} error, {} warning",
                if summary.error > 0 { "error" } else { "notice" },
                summary.error,
                summary.warning
            ),
        });
        lines.join("\n")
    }
}
