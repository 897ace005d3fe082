//! Findings emitted by the differ and the linter

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is
///
/// Diff findings use `Breaking`, `Deprecation` and `Compatible`; lint
/// findings use `Error` and `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Existing clients are expected to fail
    Breaking,
    /// Still works, but scheduled for removal
    Deprecation,
    /// Additive, non-breaking change
    Compatible,
    /// Design rule violation that fails the lint
    Error,
    /// Design rule violation that costs score points
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Breaking => "breaking",
            Severity::Deprecation => "deprecation",
            Severity::Compatible => "compatible",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Whether this severity belongs to the diff family
    pub fn is_diff(&self) -> bool {
        matches!(
            self,
            Severity::Breaking | Severity::Deprecation | Severity::Compatible
        )
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of what a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    // Diff
    EndpointRemoved,
    MethodRemoved,
    RequiredParamAdded,
    OperationDeprecated,
    TypeChanged,
    FieldRemoved,
    FieldTypeChanged,
    EndpointAdded,
    // Lint
    PathNaming,
    MissingOperationId,
    FieldNaming,
    MissingVersion,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::EndpointRemoved => "endpoint-removed",
            FindingKind::MethodRemoved => "method-removed",
            FindingKind::RequiredParamAdded => "required-param-added",
            FindingKind::OperationDeprecated => "operation-deprecated",
            FindingKind::TypeChanged => "type-changed",
            FindingKind::FieldRemoved => "field-removed",
            FindingKind::FieldTypeChanged => "field-type-changed",
            FindingKind::EndpointAdded => "endpoint-added",
            FindingKind::PathNaming => "path-naming",
            FindingKind::MissingOperationId => "missing-operation-id",
            FindingKind::FieldNaming => "field-naming",
            FindingKind::MissingVersion => "missing-version",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diff or lint result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    /// Human-readable pointer, e.g. `POST /orders [201].amount`
    pub location: String,
    /// Free-text explanation
    pub detail: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        kind: FindingKind,
        location: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            location: location.into(),
            detail: detail.into(),
        }
    }

    pub fn is_breaking(&self) -> bool {
        self.severity == Severity::Breaking
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}: {}", self.severity, self.kind, self.location, self.detail)
    }
}

/// True iff any finding is breaking
pub fn has_breaking(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_breaking)
}

/// Per-severity counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub breaking: usize,
    pub deprecation: usize,
    pub compatible: usize,
    pub error: usize,
    pub warning: usize,
}

impl Summary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut acc, f| {
            match f.severity {
                Severity::Breaking => acc.breaking += 1,
                Severity::Deprecation => acc.deprecation += 1,
                Severity::Compatible => acc.compatible += 1,
                Severity::Error => acc.error += 1,
                Severity::Warning => acc.warning += 1,
            }
            acc
        })
    }
}
