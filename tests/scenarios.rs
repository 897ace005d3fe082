//! End-to-end tests over fixture documents
//!
//! Loads real YAML/JSON documents from `tests/fixtures` and checks the exact
//! findings, their order, and the resulting score.

use std::path::{Path, PathBuf};

use specguard::report::{GithubRenderer, JsonRenderer, Renderer, ReportKind};
use specguard::{
    diff, diff_files, has_breaking, lint, score, Document, Finding, FindingKind, Severity,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load(name: &str) -> Document {
    Document::from_path(fixture(name)).unwrap()
}

// =============================================================================
// Diff
// =============================================================================

#[test]
fn test_v1_to_v2_findings_in_traversal_order() {
    let changes = diff(&load("orders_v1.yaml"), &load("orders_v2.yaml"));
    assert_eq!(
        changes,
        vec![
            Finding::new(Severity::Deprecation, FindingKind::OperationDeprecated, "GET /orders", "Marked deprecated"),
            Finding::new(
                Severity::Breaking,
                FindingKind::FieldTypeChanged,
                "POST /orders [201].amount",
                "\"amount\": integer -> string"
            ),
            Finding::new(
                Severity::Breaking,
                FindingKind::RequiredParamAdded,
                "GET /users",
                "New required param \"tenant_id\""
            ),
            Finding::new(Severity::Compatible, FindingKind::EndpointAdded, "/webhooks", "New endpoint"),
        ]
    );
    assert!(has_breaking(&changes));
}

#[test]
fn test_removed_endpoint_across_formats() {
    let changes = diff_files(fixture("orders_v1.yaml"), fixture("orders_v3.json")).unwrap();
    assert_eq!(
        changes,
        vec![Finding::new(Severity::Breaking, FindingKind::EndpointRemoved, "/orders", "Endpoint removed")]
    );
}

#[test]
fn test_reverse_diff_reports_added_endpoint_only() {
    let changes = diff(&load("orders_v3.json"), &load("orders_v1.yaml"));
    assert_eq!(
        changes,
        vec![Finding::new(Severity::Compatible, FindingKind::EndpointAdded, "/orders", "New endpoint")]
    );
    assert!(!has_breaking(&changes));
}

#[test]
fn test_fixture_against_itself_is_clean() {
    for name in ["orders_v1.yaml", "orders_v2.yaml", "orders_v3.json", "unversioned.json"] {
        let doc = load(name);
        assert!(diff(&doc, &doc.clone()).is_empty(), "{} diffed against itself", name);
    }
}

#[test]
fn test_yaml11_false_words_do_not_break() {
    let changes = diff(&load("search_v1.yaml"), &load("search_v2.yaml"));
    assert_eq!(
        changes,
        vec![Finding::new(
            Severity::Breaking,
            FindingKind::RequiredParamAdded,
            "GET /search",
            "New required param \"tenant_id\""
        )]
    );
}

#[test]
fn test_unparseable_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.yaml");
    std::fs::write(&broken, "paths: [unclosed").unwrap();
    assert!(Document::from_path(&broken).is_err());
    assert!(diff_files(&broken, fixture("orders_v1.yaml")).is_err());
}

// =============================================================================
// Lint and score
// =============================================================================

#[test]
fn test_clean_fixture_lints_clean() {
    let doc = load("orders_v1.yaml");
    assert!(lint(&doc).is_empty());
    assert_eq!(score(&doc), 100);
}

#[test]
fn test_unversioned_fixture_findings() {
    let issues = lint(&load("unversioned.json"));
    assert_eq!(
        issues,
        vec![
            Finding::new(
                Severity::Warning,
                FindingKind::PathNaming,
                "/User_Profiles",
                "\"User_Profiles\" should be kebab-case"
            ),
            Finding::new(
                Severity::Warning,
                FindingKind::FieldNaming,
                "GET /User_Profiles.firstName",
                "\"firstName\" should be snake_case"
            ),
            Finding::new(Severity::Error, FindingKind::MissingOperationId, "POST /User_Profiles", "Missing operationId"),
            Finding::new(
                Severity::Warning,
                FindingKind::FieldNaming,
                "POST /User_Profiles.profile-id",
                "\"profile-id\" should be snake_case"
            ),
            Finding::new(Severity::Error, FindingKind::MissingVersion, "info.version", "API version required"),
        ]
    );
}

#[test]
fn test_unversioned_fixture_score() {
    // 2 errors, 3 warnings
    assert_eq!(score(&load("unversioned.json")), 71);
}

#[test]
fn test_missing_version_reported_once() {
    let issues = lint(&load("unversioned.json"));
    let count = issues.iter().filter(|i| i.kind == FindingKind::MissingVersion).count();
    assert_eq!(count, 1);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_github_annotations_for_fixture_diff() {
    let changes = diff(&load("orders_v1.yaml"), &load("orders_v2.yaml"));
    let out = GithubRenderer::new(ReportKind::Diff).render(&changes);
    assert!(out.contains("::error file=POST /orders [201].amount::field-type-changed: \"amount\": integer -> string"));
    assert!(out.ends_with("::error ::Summary: 2 breaking, 1 deprecation, 1 compatible"));
}

#[test]
fn test_github_annotations_for_fixture_lint() {
    let issues = lint(&load("unversioned.json"));
    let out = GithubRenderer::new(ReportKind::Lint).render(&issues);
    assert!(out.ends_with("::error ::Summary: 2 error, 3 warning"));
}

#[test]
fn test_json_report_for_fixture_diff() {
    let changes = diff(&load("orders_v1.yaml"), &load("orders_v3.json"));
    let report: serde_json::Value = serde_json::from_str(&JsonRenderer::new(ReportKind::Diff).render(&changes)).unwrap();
    assert_eq!(report["summary"]["breaking"], 1);
    assert_eq!(report["changes"][0]["description"], "endpoint-removed: Endpoint removed");
}
