//! Tests for the surface tree walk and the engine facade.

use dynval::interpreter::DEFAULT_MAX_DEPTH;
use dynval::parser::parse_surface_value;
use dynval::{ChildReference, Component, Engine, RenderWarning, Surface};
use serde_json::{Value, json};

fn surface(document: Value) -> Surface {
    parse_surface_value(document).unwrap()
}

fn list_surface() -> Surface {
    surface(json!({
        "root": "main",
        "components": [
            {"id": "main", "component": "Column", "children": ["title", "list"]},
            {"id": "title", "component": "Text", "properties": {"text": "/title"}},
            {"id": "list", "component": "List",
             "children": {"componentId": "row", "path": "/items"}},
            {"id": "row", "component": "Row", "children": ["label"],
             "checks": [{"condition": {"call": "required", "args": {"value": "/name"}},
                         "message": "Name is required"}],
             "accessibility": {"label": "/name", "description": "/title"},
             "weight": "/weight"},
            {"id": "label", "component": "Text",
             "properties": {"text": "/name", "missing": "/nope"}}
        ],
        "data": {
            "title": "Inventory",
            "items": [{"name": "bolt", "weight": 2}, {"name": "", "weight": 0.5}]
        }
    }))
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn renders_every_reachable_component() {
    let rendered = Engine::new().render(&list_surface());
    assert!(rendered.warnings.is_empty());

    let ids: Vec<&str> = rendered.nodes().iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["main", "title", "list", "row", "label", "row", "label"]);

    let root = rendered.root.as_ref().unwrap();
    assert_eq!(root.component_type, "Column");
    assert_eq!(root.children[0].properties["text"], "Inventory");
}

#[test]
fn template_instances_get_their_own_scope() {
    let rendered = Engine::new().render(&list_surface());
    let list = &rendered.root.as_ref().unwrap().children[1];

    assert_eq!(list.children.len(), 2);
    let first = &list.children[0];
    let second = &list.children[1];
    assert_eq!(first.scoped_data, Some(json!({"name": "bolt", "weight": 2})));
    assert_eq!(first.weight, Some(2.0));
    assert_eq!(second.weight, Some(0.5));
}

#[test]
fn static_children_inherit_template_scope() {
    let rendered = Engine::new().render(&list_surface());
    let list = &rendered.root.as_ref().unwrap().children[1];

    let label = &list.children[0].children[0];
    assert_eq!(label.id, "label");
    assert_eq!(label.properties["text"], "bolt");
    assert_eq!(label.scoped_data, Some(json!({"name": "bolt", "weight": 2})));
}

#[test]
fn unresolvable_properties_are_omitted() {
    let rendered = Engine::new().render(&list_surface());
    let list = &rendered.root.as_ref().unwrap().children[1];
    let label = &list.children[0].children[0];
    assert!(!label.properties.contains_key("missing"));
}

#[test]
fn accessibility_is_resolved_with_scope_fallback() {
    let rendered = Engine::new().render(&list_surface());
    let list = &rendered.root.as_ref().unwrap().children[1];
    let accessibility = list.children[0].accessibility.as_ref().unwrap();
    assert_eq!(accessibility.label.as_deref(), Some("bolt"));
    assert_eq!(accessibility.description.as_deref(), Some("Inventory"));
}

#[test]
fn validation_runs_per_instance() {
    let rendered = Engine::new().render(&list_surface());
    let list = &rendered.root.as_ref().unwrap().children[1];

    let first = list.children[0].validation.as_ref().unwrap();
    let second = list.children[1].validation.as_ref().unwrap();
    assert!(first.is_valid);
    assert!(!second.is_valid);
    assert_eq!(second.errors, vec!["Name is required"]);

    // Components without checks carry no validation result.
    assert!(rendered.root.as_ref().unwrap().validation.is_none());
}

#[test]
fn recursive_templates_render_until_data_runs_out() {
    let surface = surface(json!({
        "root": "tree",
        "components": [
            {"id": "tree", "component": "Column",
             "children": {"componentId": "node", "path": "/nodes"}},
            {"id": "node", "component": "TreeItem", "properties": {"text": "/name"},
             "children": {"componentId": "node", "path": "/children"}}
        ],
        "data": {"nodes": [
            {"name": "a", "children": [{"name": "a1", "children": []}, {"name": "a2"}]},
            {"name": "b", "children": []}
        ]}
    }));

    let rendered = Engine::new().render(&surface);
    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);
    let names: Vec<&Value> = rendered
        .nodes()
        .into_iter()
        .filter_map(|node| node.properties.get("text"))
        .collect();
    assert_eq!(names, vec!["a", "a1", "a2", "b"]);
}

#[test]
fn serializes_to_json() {
    let surface = surface(json!({
        "root": "main",
        "components": [
            {"id": "main", "component": "Text", "properties": {"text": "/title"}, "weight": 2}
        ],
        "data": {"title": "Hi"}
    }));
    let rendered = Engine::new().render(&surface);
    insta::assert_snapshot!(
        serde_json::to_string(&rendered).unwrap(),
        @r#"{"root":{"id":"main","component":"Text","properties":{"text":"Hi"},"weight":2.0}}"#
    );
}

// =========================================================================
// Guards
// =========================================================================

#[test]
fn missing_children_are_skipped_with_a_warning() {
    let surface = surface(json!({
        "root": "main",
        "components": [
            {"id": "main", "component": "Column", "children": ["ghost", "title", "ghost"]},
            {"id": "title", "component": "Text"}
        ]
    }));
    let rendered = Engine::new().render(&surface);

    assert_eq!(rendered.root.as_ref().unwrap().children.len(), 1);
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::MissingComponent {
            parent: "main".into(),
            id: "ghost".into()
        }]
    );
}

#[test]
fn static_cycles_are_cut() {
    let surface = surface(json!({
        "root": "a",
        "components": [
            {"id": "a", "component": "Column", "children": ["b"]},
            {"id": "b", "component": "Column", "children": ["a"]}
        ]
    }));
    let rendered = Engine::new().render(&surface);

    let root = rendered.root.as_ref().unwrap();
    assert_eq!(root.children.len(), 1);
    assert!(root.children[0].children.is_empty());
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::CyclicComponent {
            chain: vec!["a".into(), "b".into(), "a".into()]
        }]
    );
    insta::assert_snapshot!(
        rendered.warnings[0].to_string(),
        @"cyclic component reference: a -> b -> a"
    );
}

#[test]
fn self_listing_template_is_cut() {
    let surface = surface(json!({
        "root": "list",
        "components": [
            {"id": "list", "component": "List",
             "children": {"componentId": "row", "path": "/items"}},
            {"id": "row", "component": "Row", "children": ["row"]}
        ],
        "data": {"items": [{"n": 1}, {"n": 2}]}
    }));
    let rendered = Engine::new().render(&surface);

    assert_eq!(rendered.root.as_ref().unwrap().children.len(), 2);
    assert_eq!(rendered.warnings.len(), 1);
    assert!(matches!(
        &rendered.warnings[0],
        RenderWarning::CyclicComponent { chain } if chain == &["list", "row", "row"]
    ));
}

fn items(count: usize) -> Vec<Value> {
    (0..count).map(|n| json!({"n": n})).collect()
}

#[test]
fn template_reexpanding_root_data_is_cut() {
    // Items carry no "items" key, so every instance falls back to the root
    // array and would list all items again.
    let surface = surface(json!({
        "root": "list",
        "components": [
            {"id": "list", "component": "List",
             "children": {"componentId": "list", "path": "/items"}}
        ],
        "data": {"items": items(12)}
    }));
    let rendered = Engine::new().render(&surface);

    let root = rendered.root.as_ref().unwrap();
    assert_eq!(root.children.len(), 12);
    assert!(root.children.iter().all(|child| child.children.is_empty()));
    assert_eq!(rendered.nodes().len(), 13);
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::CyclicComponent {
            chain: vec!["list".into(), "list".into()]
        }]
    );
}

#[test]
fn mutually_recursive_templates_over_root_data_are_cut() {
    let surface = surface(json!({
        "root": "list",
        "components": [
            {"id": "list", "component": "List",
             "children": {"componentId": "row", "path": "/items"}},
            {"id": "row", "component": "Row",
             "children": {"componentId": "list", "path": "/items"}}
        ],
        "data": {"items": items(12)}
    }));
    let rendered = Engine::new().render(&surface);

    // list -> 12 rows -> 12 lists each, whose own expansion is refused.
    assert_eq!(rendered.nodes().len(), 1 + 12 + 12 * 12);
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::CyclicComponent {
            chain: vec!["list".into(), "row".into(), "list".into()]
        }]
    );
}

#[test]
fn depth_limit_is_enforced() {
    let components: Vec<Value> = (0..5)
        .map(|i| {
            json!({"id": format!("c{i}"), "component": "Box", "children": [format!("c{}", i + 1)]})
        })
        .collect();
    let surface = surface(json!({"root": "c0", "components": components}));

    let engine = Engine::builder().max_depth(3).build();
    let rendered = engine.render(&surface);

    assert_eq!(rendered.nodes().len(), 3);
    assert!(rendered.warnings.contains(&RenderWarning::MaxDepthExceeded {
        component: "c3".into(),
        max_depth: 3
    }));
}

#[test]
fn missing_root_renders_nothing() {
    let surface = Surface::builder()
        .root("nowhere")
        .components(
            [Component::builder().id("a").component_type("Text").build()]
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
        )
        .build();
    let rendered = Engine::new().render(&surface);

    assert!(rendered.root.is_none());
    assert_eq!(
        rendered.warnings,
        vec![RenderWarning::MissingRoot {
            root: "nowhere".into()
        }]
    );
}

// =========================================================================
// Engine
// =========================================================================

#[test]
fn engine_defaults() {
    assert_eq!(Engine::new().max_depth(), DEFAULT_MAX_DEPTH);
    assert_eq!(DEFAULT_MAX_DEPTH, 64);
}

#[test]
fn engine_resolves_with_optional_scope() {
    let surface = list_surface();
    let engine = Engine::new();
    let scope = json!({"title": "Scoped"});

    assert_eq!(engine.resolve(&surface, &"/title".into(), None), Some(json!("Inventory")));
    assert_eq!(engine.resolve(&surface, &"/title".into(), Some(&scope)), Some(json!("Scoped")));
}

#[test]
fn engine_validates_single_component() {
    let surface = list_surface();
    let engine = Engine::new();

    let valid = engine
        .validate_component(&surface, "row", Some(&json!({"name": "x"})))
        .unwrap();
    assert!(valid.is_valid);

    let invalid = engine.validate_component(&surface, "row", None).unwrap();
    assert_eq!(invalid.errors, vec!["Name is required"]);

    assert!(engine.validate_component(&surface, "ghost", None).is_none());
}

#[test]
fn engine_resolves_children() {
    let surface = list_surface();
    let engine = Engine::new();

    assert_eq!(
        engine.children(&surface, "main", None),
        Some(vec![ChildReference::new("title"), ChildReference::new("list")])
    );
    let rows = engine.children(&surface, "list", None).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].component_id, "row");
}
