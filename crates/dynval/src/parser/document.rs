//! Surface document parser.
//!
//! Reads the JSON document shape into a [`Surface`]. Structural problems
//! (bad JSON, duplicate ids, malformed children or checks) are reported here so
//! that resolution never has to.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{LoadError, ParseError};
use super::expression::{CALL_KEY, parse_expression};
use crate::types::{Accessibility, Check, Children, Component, DynamicValue, JsonPointer, Surface};

#[derive(Deserialize)]
struct SurfaceJson {
    root: String,
    components: Vec<ComponentJson>,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct ComponentJson {
    id: String,
    component: String,
    #[serde(default)]
    properties: Map<String, Value>,
    #[serde(default)]
    children: Value,
    #[serde(default)]
    checks: Option<Vec<Value>>,
    #[serde(default)]
    accessibility: Option<AccessibilityJson>,
    #[serde(default)]
    weight: Option<Value>,
}

#[derive(Deserialize)]
struct AccessibilityJson {
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
}

/// Parse a surface document from JSON text.
///
/// # Example
///
/// ```
/// use dynval::parser::parse_surface;
///
/// let surface = parse_surface(r#"{
///     "root": "main",
///     "components": [
///         {"id": "main", "component": "Column", "children": ["title"]},
///         {"id": "title", "component": "Text", "properties": {"text": "/title"}}
///     ],
///     "data": {"title": "Hello"}
/// }"#).unwrap();
///
/// assert_eq!(surface.root, "main");
/// assert_eq!(surface.components.len(), 2);
/// ```
pub fn parse_surface(input: &str) -> Result<Surface, ParseError> {
    let document: SurfaceJson = serde_json::from_str(input)?;
    build_surface(document)
}

/// Parse a surface document from an already decoded JSON value.
pub fn parse_surface_value(value: Value) -> Result<Surface, ParseError> {
    let document: SurfaceJson = serde_json::from_value(value)?;
    build_surface(document)
}

/// Read and parse a surface document from a file.
pub fn load_surface(path: impl AsRef<Path>) -> Result<Surface, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_surface(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_surface(document: SurfaceJson) -> Result<Surface, ParseError> {
    let mut components = BTreeMap::new();
    for raw in document.components {
        let component = build_component(raw)?;
        match components.entry(component.id.clone()) {
            Entry::Occupied(entry) => {
                return Err(ParseError::DuplicateComponent {
                    id: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(component);
            }
        }
    }

    if !components.contains_key(&document.root) {
        return Err(ParseError::MissingRoot {
            root: document.root,
        });
    }

    let data = match document.data {
        Value::Null => Value::Object(Map::new()),
        data => data,
    };
    debug!(
        root = %document.root,
        components = components.len(),
        "parsed surface"
    );

    Ok(Surface {
        root: document.root,
        components,
        data,
    })
}

fn build_component(raw: ComponentJson) -> Result<Component, ParseError> {
    let children = parse_children(&raw.id, &raw.children)?;
    let checks = raw
        .checks
        .map(|checks| {
            checks
                .iter()
                .enumerate()
                .map(|(index, check)| parse_check(&raw.id, index, check))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let properties = raw
        .properties
        .iter()
        .map(|(name, value)| (name.clone(), parse_expression(value)))
        .collect();
    let accessibility = raw.accessibility.map(|a| Accessibility {
        label: a.label.as_ref().map(parse_expression),
        description: a.description.as_ref().map(parse_expression),
    });

    Ok(Component::builder()
        .id(raw.id)
        .component_type(raw.component)
        .properties(properties)
        .maybe_children(children)
        .maybe_checks(checks)
        .maybe_accessibility(accessibility)
        .maybe_weight(raw.weight.as_ref().map(parse_expression))
        .build())
}

/// Parse a children expression.
///
/// Accepted shapes: absent/null, a single id, an array of ids (non-string
/// entries skipped), or a `{componentId, path}` template descriptor.
fn parse_children(component: &str, value: &Value) -> Result<Option<Children>, ParseError> {
    let invalid = |message: &str| ParseError::InvalidChildren {
        component: component.to_string(),
        message: message.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::String(id) => Ok(Some(Children::Explicit(vec![id.clone()]))),
        Value::Array(items) => Ok(Some(Children::Explicit(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ))),
        Value::Object(map) => {
            let component_id = map
                .get("componentId")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("template is missing a string 'componentId'"))?;
            let path = map
                .get("path")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("template is missing a string 'path'"))?;
            Ok(Some(Children::Template {
                component_id: component_id.to_string(),
                path: JsonPointer::parse(path),
            }))
        }
        Value::Bool(_) | Value::Number(_) => {
            Err(invalid("expected an id, a list of ids, or a template"))
        }
    }
}

/// Parse a check: either `{condition, message}` or a function call carrying
/// its own `message`.
fn parse_check(component: &str, index: usize, value: &Value) -> Result<Check, ParseError> {
    let invalid = |message: &str| ParseError::InvalidCheck {
        component: component.to_string(),
        index,
        message: message.to_string(),
    };

    let Value::Object(map) = value else {
        return Err(invalid("expected an object"));
    };
    let message = map
        .get("message")
        .map_or(DynamicValue::Null, parse_expression);

    if let Some(condition) = map.get("condition") {
        return Ok(Check::new(parse_expression(condition), message));
    }

    if matches!(map.get(CALL_KEY), Some(Value::String(_))) {
        let mut call = map.clone();
        call.remove("message");
        return Ok(Check::new(parse_expression(&Value::Object(call)), message));
    }

    Err(invalid("expected a 'condition' or a function call"))
}
