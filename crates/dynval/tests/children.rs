//! Tests for the child list resolver.

use dynval::{ChildListResolver, ChildReference, Children, FunctionEvaluator, JsonPointer, Resolver};
use serde_json::{Value, json};

fn expand(data: &Value, children: Option<&Children>) -> Vec<ChildReference> {
    let evaluator = FunctionEvaluator::default();
    let resolver = Resolver::new(data, &evaluator);
    ChildListResolver::new(&resolver).resolve(children)
}

fn template(component_id: &str, path: &str) -> Children {
    Children::Template {
        component_id: component_id.to_string(),
        path: JsonPointer::parse(path),
    }
}

#[test]
fn absent_children_are_empty() {
    assert!(expand(&json!({}), None).is_empty());
}

#[test]
fn static_list_preserves_order() {
    let children = Children::Explicit(vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(
        expand(&json!({}), Some(&children)),
        vec![ChildReference::new("a"), ChildReference::new("b"), ChildReference::new("c")]
    );
}

#[test]
fn static_children_carry_no_scope() {
    let children = Children::Explicit(vec!["only".into()]);
    let refs = expand(&json!({"x": 1}), Some(&children));
    assert_eq!(refs.len(), 1);
    assert!(refs[0].scoped_data.is_none());
}

#[test]
fn template_expands_one_reference_per_element() {
    let data = json!({"items": [
        {"name": "first"},
        {"name": "second"},
        {"name": "third"}
    ]});
    let refs = expand(&data, Some(&template("tmpl", "/items")));

    assert_eq!(refs.len(), 3);
    assert!(refs.iter().all(|r| r.component_id == "tmpl"));
    assert_eq!(refs[0].scoped_data, Some(json!({"name": "first"})));
    assert_eq!(refs[1].scoped_data, Some(json!({"name": "second"})));
    assert_eq!(refs[2].scoped_data, Some(json!({"name": "third"})));
}

#[test]
fn template_wraps_non_object_elements() {
    let data = json!({"tags": ["red", 7, null, [1]]});
    let refs = expand(&data, Some(&template("tag", "/tags")));

    let scopes: Vec<Value> = refs.into_iter().filter_map(|r| r.scoped_data).collect();
    assert_eq!(
        scopes,
        vec![
            json!({"value": "red", "index": 0}),
            json!({"value": 7, "index": 1}),
            json!({"value": null, "index": 2}),
            json!({"value": [1], "index": 3}),
        ]
    );
}

#[test]
fn template_over_non_array_is_empty() {
    let data = json!({"title": "text", "object": {"a": 1}, "empty": []});
    assert!(expand(&data, Some(&template("t", "/title"))).is_empty());
    assert!(expand(&data, Some(&template("t", "/object"))).is_empty());
    assert!(expand(&data, Some(&template("t", "/missing"))).is_empty());
    assert!(expand(&data, Some(&template("t", "/empty"))).is_empty());
}

#[test]
fn template_path_reads_scoped_data_first() {
    let root = json!({"rows": [{"id": 1}]});
    let group = json!({"rows": [{"id": 2}, {"id": 3}]});
    let evaluator = FunctionEvaluator::default();
    let resolver = Resolver::new(&root, &evaluator);
    let scoped = resolver.with_scoped_data(&group);

    let refs = ChildListResolver::new(&scoped).resolve(Some(&template("row", "/rows")));
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[1].scoped_data, Some(json!({"id": 3})));
}

#[test]
fn child_reference_serializes_camel_case() {
    let reference = ChildReference::scoped("row", json!({"n": 1}));
    insta::assert_snapshot!(
        serde_json::to_string(&reference).unwrap(),
        @r#"{"componentId":"row","scopedData":{"n":1}}"#
    );
    insta::assert_snapshot!(
        serde_json::to_string(&ChildReference::new("a")).unwrap(),
        @r#"{"componentId":"a"}"#
    );
}
