//! Plain-text terminal table

use super::{Renderer, ReportKind};
use crate::finding::{Finding, Summary};

#[derive(Debug, Clone, Copy)]
pub struct TableRenderer {
    kind: ReportKind,
}

impl TableRenderer {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            ReportKind::Diff => "SpecGuard Diff Report",
            ReportKind::Lint => "SpecGuard Lint Report",
        }
    }

    fn headers(&self) -> [&'static str; 4] {
        match self.kind {
            ReportKind::Diff => ["Severity", "Type", "Location", "Detail"],
            ReportKind::Lint => ["Level", "Rule", "Location", "Detail"],
        }
    }

    fn empty_message(&self) -> &'static str {
        match self.kind {
            ReportKind::Diff => "No changes detected",
            ReportKind::Lint => "All design rules pass",
        }
    }
}

fn format_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            let pad = width.saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    line
}

impl Renderer for TableRenderer {
    fn render(&self, findings: &[Finding]) -> String {
        if findings.is_empty() {
            return self.empty_message().to_string();
        }

        let headers = self.headers();
        let rows: Vec<[&str; 4]> = findings
            .iter()
            .map(|f| [f.severity.as_str(), f.kind.as_str(), f.location.as_str(), f.detail.as_str()])
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = vec![self.title().to_string(), format_row(&headers, &widths)];
        let rule = widths.map(|w| "-".repeat(w));
        lines.push(format_row(&rule.each_ref().map(String::as_str), &widths));
        lines.extend(rows.iter().map(|row| format_row(row, &widths)));

        if self.kind == ReportKind::Diff {
            let summary = Summary::from_findings(findings);
            lines.push(String::new());
            lines.push(format!(
                "  {} breaking | {} deprecation | {} compatible",
                summary.breaking, summary.deprecation, summary.compatible
            ));
        }
        lines.join("\n")
    }
}
