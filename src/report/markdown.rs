//! Markdown report suitable for pull-request comments

use super::{Renderer, ReportKind};
use crate::finding::{Finding, Severity, Summary};

#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    kind: ReportKind,
}

impl MarkdownRenderer {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }
}

fn emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Breaking | Severity::Error => "🔴",
        Severity::Deprecation | Severity::Warning => "🟡",
        Severity::Compatible => "🟢",
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, findings: &[Finding]) -> String {
        let summary = Summary::from_findings(findings);
        let mut lines = vec![
            "# 🛡\u{fe0f} SpecGuard Report".to_string(),
            String::new(),
            "## Summary".to_string(),
            String::new(),
            "| Category | Count |".to_string(),
            "|----------|-------|".to_string(),
        ];
        let empty_message = match self.kind {
            ReportKind::Diff => {
                lines.push(format!("| 🔴 Breaking | {} |", summary.breaking));
                lines.push(format!("| 🟡 Deprecation | {} |", summary.deprecation));
                lines.push(format!("| 🟢 Compatible | {} |", summary.compatible));
                "✅ No changes detected."
            }
            ReportKind::Lint => {
                lines.push(format!("| 🔴 Error | {} |", summary.error));
                lines.push(format!("| 🟡 Warning | {} |", summary.warning));
                "✅ All design rules pass."
            }
        };
        lines.push(String::new());

        if findings.is_empty() {
            lines.push(empty_message.to_string());
        } else {
            lines.push("## Details".to_string());
            lines.push(String::new());
            lines.extend(findings.iter().map(|f| {
                format!("- {} **{}** `{}` — {}", emoji(f.severity), f.kind, f.location, f.detail)
            }));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;
    use crate::report::fixtures::sample_changes;

    #[test]
    fn test_report_with_details() {
        let out = MarkdownRenderer::new(ReportKind::Diff).render(&sample_changes());
        assert!(out.starts_with("# 🛡\u{fe0f} SpecGuard Report\n\n## Summary\n"));
        assert!(out.contains("| 🔴 Breaking | 2 |"));
        assert!(out.contains("| 🟡 Deprecation | 1 |"));
        assert!(out.contains("## Details"));
        assert!(out.contains("- 🔴 **endpoint-removed** `/orders` — Endpoint removed"));
        assert!(out.contains("- 🟢 **endpoint-added** `/webhooks` — New endpoint"));
        assert!(out.ends_with("New endpoint\n"));
    }

    #[test]
    fn test_empty_report_omits_details() {
        let out = MarkdownRenderer::new(ReportKind::Diff).render(&[]);
        assert!(!out.contains("## Details"));
        assert!(out.contains("| 🟢 Compatible | 0 |"));
        assert!(out.ends_with("\n✅ No changes detected.\n"));
    }

    #[test]
    fn test_lint_report_counts_errors_and_warnings() {
        let issues = vec![Finding::new(
            Severity::Warning,
            FindingKind::FieldNaming,
            "GET /a.firstName",
            "\"firstName\" should be snake_case",
        )];
        let out = MarkdownRenderer::new(ReportKind::Lint).render(&issues);
        assert!(out.contains("| 🔴 Error | 0 |\n| 🟡 Warning | 1 |\n"));
        assert!(!out.contains("Breaking"));
        assert!(out.contains("- 🟡 **field-naming** `GET /a.firstName`"));

        let clean = MarkdownRenderer::new(ReportKind::Lint).render(&[]);
        assert!(clean.ends_with("\n✅ All design rules pass.\n"));
    }
}
