//! Output formats for finding lists
//!
//! One list of findings, many consumers: a terminal table, CI annotations,
//! a pull-request comment, or machine-readable JSON. Every format implements
//! [`Renderer`] and is picked by [`OutputFormat`].

mod github;
mod json;
mod markdown;
mod table;

pub use github::GithubRenderer;
pub use json::{JsonRenderer, RowsRenderer};
pub use markdown::MarkdownRenderer;
pub use table::TableRenderer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::finding::Finding;

/// Turns findings into text
pub trait Renderer {
    fn render(&self, findings: &[Finding]) -> String;
}

/// Whether findings come from a diff or a lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Diff,
    Lint,
}

/// Selectable output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Flat JSON array, one object per finding
    Rows,
    /// Structured JSON report with a summary
    Json,
    /// GitHub Actions workflow annotations
    Github,
    /// Markdown report for PR comments
    Markdown,
    /// `github` inside GitHub Actions, `table` elsewhere
    Auto,
}

impl OutputFormat {
    /// Resolve `Auto` given whether we run inside GitHub Actions
    pub fn resolve(self, in_github_actions: bool) -> Self {
        match self {
            OutputFormat::Auto if in_github_actions => OutputFormat::Github,
            OutputFormat::Auto => OutputFormat::Table,
            other => other,
        }
    }

    /// Resolve `Auto` from the `GITHUB_ACTIONS` environment variable
    pub fn resolve_from_env(self) -> Self {
        let in_actions = std::env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false);
        self.resolve(in_actions)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Rows => "rows",
            OutputFormat::Json => "json",
            OutputFormat::Github => "github",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Auto => "auto",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "rich" => Ok(OutputFormat::Table),
            "rows" => Ok(OutputFormat::Rows),
            "json" => Ok(OutputFormat::Json),
            "github" => Ok(OutputFormat::Github),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "auto" => Ok(OutputFormat::Auto),
            other => Err(format!(
                "unknown output format '{}' (expected table, rows, json, github, markdown or auto)",
                other
            )),
        }
    }
}

/// Build the renderer for a format; `Auto` is resolved from the environment
pub fn renderer_for(format: OutputFormat, kind: ReportKind) -> Box<dyn Renderer> {
    match format.resolve_from_env() {
        OutputFormat::Table | OutputFormat::Auto => Box::new(TableRenderer::new(kind)),
        OutputFormat::Rows => Box::new(RowsRenderer::new(kind)),
        OutputFormat::Json => Box::new(JsonRenderer::new(kind)),
        OutputFormat::Github => Box::new(GithubRenderer::new(kind)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new(kind)),
    }
}
