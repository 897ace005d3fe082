//! Property tests for the differ, the linter and the scorer

use proptest::prelude::*;
use proptest::sample::{select, Index};
use serde_json::{json, Map, Value};

use specguard::{diff, has_breaking, lint, score, Document, FindingKind, Severity};

fn type_name() -> impl Strategy<Value = &'static str> {
    select(vec!["string", "integer", "number", "boolean", "object", "array"])
}

fn schema() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(type_name()),
        prop::collection::btree_map(
            select(vec!["id", "amount", "firstName", "created_at", "display-name", "total"]),
            type_name(),
            0..4,
        ),
    )
        .prop_map(|(ty, props)| {
            let mut schema = Map::new();
            if let Some(ty) = ty {
                schema.insert("type".into(), json!(ty));
            }
            let props: Map<String, Value> = props
                .into_iter()
                .map(|(name, ty)| (name.to_string(), json!({ "type": ty })))
                .collect();
            schema.insert("properties".into(), Value::Object(props));
            Value::Object(schema)
        })
}

fn response() -> impl Strategy<Value = Value> {
    (schema(), any::<bool>()).prop_map(|(schema, nested)| {
        if nested {
            json!({ "description": "ok", "content": { "application/json": { "schema": schema } } })
        } else {
            json!({ "description": "ok", "schema": schema })
        }
    })
}

fn operation() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(select(vec!["", "listThings", "createThing"])),
        any::<bool>(),
        prop::collection::vec((select(vec!["limit", "cursor", "tenant_id"]), any::<bool>()), 0..3),
        prop::collection::btree_map(select(vec!["200", "201", "404"]), response(), 0..3),
    )
        .prop_map(|(op_id, deprecated, params, responses)| {
            let mut op = Map::new();
            if let Some(id) = op_id {
                op.insert("operationId".into(), json!(id));
            }
            if deprecated {
                op.insert("deprecated".into(), json!(true));
            }
            let params: Vec<Value> = params
                .into_iter()
                .map(|(name, required)| json!({ "name": name, "in": "query", "required": required }))
                .collect();
            op.insert("parameters".into(), Value::Array(params));
            let responses: Map<String, Value> = responses
                .into_iter()
                .map(|(code, resp)| (code.to_string(), resp))
                .collect();
            op.insert("responses".into(), Value::Object(responses));
            Value::Object(op)
        })
}

fn path_item() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(select(vec!["get", "post", "put", "delete"]), operation(), 0..3).prop_map(|ops| {
        let mut item: Map<String, Value> = ops.into_iter().map(|(m, op)| (m.to_string(), op)).collect();
        item.insert("x-owner".into(), json!("team"));
        Value::Object(item)
    })
}

fn document_value() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(select(vec!["", "1.0.0"])),
        prop::collection::btree_map(
            select(vec!["/users", "/User_Profiles", "/orders/{orderId}", "/a_b/c", "/webhooks"]),
            path_item(),
            0..4,
        ),
    )
        .prop_map(|(version, paths)| {
            let mut info = Map::new();
            if let Some(v) = version {
                info.insert("version".into(), json!(v));
            }
            let paths: Map<String, Value> = paths.into_iter().map(|(p, item)| (p.to_string(), item)).collect();
            json!({ "info": info, "paths": paths })
        })
}

proptest! {
    #[test]
    fn prop_diff_against_copy_is_empty(value in document_value()) {
        let doc = Document::from_value(value.clone());
        let copy = Document::from_value(value);
        prop_assert!(diff(&doc, &copy).is_empty());
    }

    #[test]
    fn prop_removed_path_yields_single_finding(
        value in document_value().prop_filter("needs a path", |v| {
            v["paths"].as_object().map(|p| !p.is_empty()).unwrap_or(false)
        }),
        pick in any::<Index>(),
    ) {
        let paths = value["paths"].as_object().unwrap();
        let removed = pick.get(&paths.keys().collect::<Vec<_>>()).to_string();

        let mut new_value = value.clone();
        new_value["paths"].as_object_mut().unwrap().remove(&removed);

        let changes = diff(&Document::from_value(value), &Document::from_value(new_value));
        prop_assert_eq!(changes.len(), 1);
        prop_assert_eq!(changes[0].kind, FindingKind::EndpointRemoved);
        prop_assert_eq!(&changes[0].location, &removed);
    }

    #[test]
    fn prop_diff_severities_and_has_breaking(old in document_value(), new in document_value()) {
        let changes = diff(&Document::from_value(old), &Document::from_value(new));
        prop_assert!(changes.iter().all(|c| c.severity.is_diff()));
        let any_breaking = changes.iter().any(|c| c.severity == Severity::Breaking);
        prop_assert_eq!(has_breaking(&changes), any_breaking);
    }

    #[test]
    fn prop_score_bounds(value in document_value()) {
        let doc = Document::from_value(value);
        let s = score(&doc);
        prop_assert!(s <= 100);
        prop_assert_eq!(s == 100, lint(&doc).is_empty());
    }

    #[test]
    fn prop_lint_severities(value in document_value()) {
        let issues = lint(&Document::from_value(value));
        prop_assert!(issues.iter().all(|i| matches!(i.severity, Severity::Error | Severity::Warning)));
    }

    #[test]
    fn prop_parameter_asymmetry(value in document_value(), required in any::<bool>()) {
        let mut new_value = value.clone();
        let mut touched = Vec::new();
        if let Some(paths) = new_value["paths"].as_object_mut() {
            for (path, item) in paths.iter_mut() {
                for (method, op) in item.as_object_mut().into_iter().flatten() {
                    if method.starts_with("x-") {
                        continue;
                    }
                    if let Some(params) = op["parameters"].as_array_mut() {
                        params.push(json!({ "name": "brand_new", "in": "header", "required": required }));
                        touched.push(format!("{} {}", method.to_uppercase(), path));
                    }
                }
            }
        }

        let changes = diff(&Document::from_value(value), &Document::from_value(new_value));
        let flagged: Vec<_> = changes
            .iter()
            .filter(|c| c.kind == FindingKind::RequiredParamAdded)
            .map(|c| c.location.clone())
            .collect();
        if required {
            prop_assert_eq!(&flagged, &touched);
        } else {
            prop_assert!(flagged.is_empty());
        }
        prop_assert_eq!(changes.len(), if required { touched.len() } else { 0 });
    }

    #[test]
    fn prop_removing_parameters_never_flags(value in document_value()) {
        let mut new_value = value.clone();
        if let Some(paths) = new_value["paths"].as_object_mut() {
            for (_, item) in paths.iter_mut() {
                for (_, op) in item.as_object_mut().into_iter().flatten() {
                    if let Some(params) = op.get_mut("parameters").and_then(Value::as_array_mut) {
                        params.clear();
                    }
                }
            }
        }
        let changes = diff(&Document::from_value(value), &Document::from_value(new_value));
        prop_assert!(changes.is_empty());
    }
}
