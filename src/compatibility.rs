//! Structural diff between two versions of an API document
//!
//! Walks the old document's paths and operations in document order and
//! classifies every structural delta it sees. Findings come out in traversal
//! order, so the same pair of documents always yields the same sequence.
//!
//! Schema comparison is single-level: a response schema's own `type` and the
//! `type` of each of its direct properties. Nested sub-properties and added
//! fields are not compared.

use std::collections::HashSet;

use tracing::debug;

use crate::document::{describe_type, Document, Operation, SchemaView};
use crate::finding::{Finding, FindingKind, Severity};

/// Diff two documents
pub fn diff_documents(old: &Document, new: &Document) -> Vec<Finding> {
    let mut changes = Vec::new();
    let old_paths = old.paths();
    let new_paths = new.paths();

    for (path, old_item) in old_paths.iter() {
        let Some(new_item) = new_paths.get(path) else {
            push(
                &mut changes,
                Finding::new(
                    Severity::Breaking,
                    FindingKind::EndpointRemoved,
                    path,
                    "Endpoint removed",
                ),
            );
            continue;
        };

        for (method, old_op) in old_item.operations() {
            let location = format!("{} {}", method.to_uppercase(), path);
            let Some(new_op) = new_item.operation(method) else {
                push(
                    &mut changes,
                    Finding::new(
                        Severity::Breaking,
                        FindingKind::MethodRemoved,
                        location,
                        "Method removed",
                    ),
                );
                continue;
            };
            diff_operation(&old_op, &new_op, &location, &mut changes);
        }
    }

    for (path, _) in new_paths.iter() {
        if !old_paths.contains(path) {
            push(
                &mut changes,
                Finding::new(
                    Severity::Compatible,
                    FindingKind::EndpointAdded,
                    path,
                    "New endpoint",
                ),
            );
        }
    }

    debug!(count = changes.len(), "diff complete");
    changes
}

fn push(changes: &mut Vec<Finding>, finding: Finding) {
    debug!(kind = %finding.kind, location = %finding.location, "change detected");
    changes.push(finding);
}

fn diff_operation(
    old: &Operation<'_>,
    new: &Operation<'_>,
    location: &str,
    changes: &mut Vec<Finding>,
) {
    // Only newly introduced required parameters break clients; removals and
    // required -> optional relaxations do not.
    let old_params: HashSet<&str> = old.parameters().filter_map(|p| p.name()).collect();
    for param in new.parameters() {
        let Some(name) = param.name() else { continue };
        if !old_params.contains(name) && param.is_required() {
            push(
                changes,
                Finding::new(
                    Severity::Breaking,
                    FindingKind::RequiredParamAdded,
                    location,
                    format!("New required param \"{}\"", name),
                ),
            );
        }
    }

    if !old.is_deprecated() && new.is_deprecated() {
        push(
            changes,
            Finding::new(
                Severity::Deprecation,
                FindingKind::OperationDeprecated,
                location,
                "Marked deprecated",
            ),
        );
    }

    let new_responses = new.responses();
    for (code, old_resp) in old.responses().iter() {
        let Some(new_resp) = new_responses.get(code).filter(|r| r.is_present()) else {
            continue;
        };
        diff_schema(
            &old_resp.schema(),
            &new_resp.schema(),
            &format!("{} [{}]", location, code),
            changes,
        );
    }
}

fn diff_schema(
    old: &SchemaView<'_>,
    new: &SchemaView<'_>,
    location: &str,
    changes: &mut Vec<Finding>,
) {
    if let Some(old_type) = old.declared_type() {
        if Some(old_type) != new.type_value() {
            push(
                changes,
                Finding::new(
                    Severity::Breaking,
                    FindingKind::TypeChanged,
                    location,
                    format!(
                        "Type: {} -> {}",
                        describe_type(Some(old_type)),
                        describe_type(new.type_value())
                    ),
                ),
            );
        }
    }

    for (field, old_prop) in old.properties() {
        let field_location = format!("{}.{}", location, field);
        match new.property(field) {
            None => push(
                changes,
                Finding::new(
                    Severity::Breaking,
                    FindingKind::FieldRemoved,
                    field_location,
                    format!("Field \"{}\" removed", field),
                ),
            ),
            Some(new_prop) if old_prop.type_value() != new_prop.type_value() => push(
                changes,
                Finding::new(
                    Severity::Breaking,
                    FindingKind::FieldTypeChanged,
                    field_location,
                    format!(
                        "\"{}\": {} -> {}",
                        field,
                        describe_type(old_prop.type_value()),
                        describe_type(new_prop.type_value())
                    ),
                ),
            ),
            Some(_) => {}
        }
    }
}
