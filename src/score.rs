//! API design consistency score

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::Document;
use crate::finding::{Finding, Severity};
use crate::lint::lint_document;

pub const MAX_SCORE: u32 = 100;
const ERROR_PENALTY: i64 = 10;
const WARNING_PENALTY: i64 = 3;

/// Score a document in `0..=100`
///
/// Starts at 100 and loses 10 points per lint error and 3 per lint warning.
pub fn score_document(doc: &Document) -> u32 {
    score_findings(&lint_document(doc))
}

/// Score an already computed list of lint findings
pub fn score_findings(issues: &[Finding]) -> u32 {
    let penalty: i64 = issues
        .iter()
        .map(|issue| match issue.severity {
            Severity::Error => ERROR_PENALTY,
            Severity::Warning => WARNING_PENALTY,
            _ => 0,
        })
        .sum();
    (i64::from(MAX_SCORE) - penalty).clamp(0, i64::from(MAX_SCORE)) as u32
}

/// Coarse quality band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        match score {
            80.. => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Good => f.write_str("good"),
            ScoreBand::Fair => f.write_str("fair"),
            ScoreBand::Poor => f.write_str("poor"),
        }
    }
}
