//! The child list resolver: turns a [`Children`] expression into concrete
//! [`ChildReference`]s.

use serde_json::{Map, Value};
use tracing::debug;

use crate::interpreter::resolver::Resolver;
use crate::types::{ChildReference, Children};

/// Key holding a non-object template element in its synthesized scope.
pub const VALUE_KEY: &str = "value";
/// Key holding a non-object template element's zero-based position.
pub const INDEX_KEY: &str = "index";

/// Expands children expressions against a [`Resolver`].
///
/// # Example
///
/// ```
/// use dynval::{ChildListResolver, Children, FunctionEvaluator, Resolver};
/// use serde_json::json;
///
/// let data = json!({"items": [{"name": "a"}, "b"]});
/// let evaluator = FunctionEvaluator::default();
/// let resolver = Resolver::new(&data, &evaluator);
///
/// let children = Children::Template {
///     component_id: "row".to_string(),
///     path: "/items".into(),
/// };
/// let refs = ChildListResolver::new(&resolver).resolve(Some(&children));
///
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].scoped_data, Some(json!({"name": "a"})));
/// assert_eq!(refs[1].scoped_data, Some(json!({"value": "b", "index": 1})));
/// ```
#[derive(Clone, Copy)]
pub struct ChildListResolver<'r> {
    resolver: &'r Resolver<'r>,
}

impl<'r> ChildListResolver<'r> {
    pub fn new(resolver: &'r Resolver<'r>) -> Self {
        Self { resolver }
    }

    /// Resolve a children expression, preserving order.
    ///
    /// - Absent → no children
    /// - Explicit ids → one unscoped reference each
    /// - Template → one scoped reference per element of the array at `path`,
    ///   or no children if `path` does not resolve to an array
    pub fn resolve(&self, children: Option<&Children>) -> Vec<ChildReference> {
        match children {
            None => Vec::new(),
            Some(Children::Explicit(ids)) => ids.iter().map(ChildReference::new).collect(),
            Some(Children::Template { component_id, path }) => {
                match self.resolver.resolve_json_pointer(path) {
                    Some(Value::Array(items)) => items
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| {
                            ChildReference::scoped(component_id, item_scope(index, item))
                        })
                        .collect(),
                    other => {
                        debug!(
                            template = %component_id,
                            %path,
                            found = other.as_ref().map_or("nothing", value_kind),
                            "template source is not an array"
                        );
                        Vec::new()
                    }
                }
            }
        }
    }
}

/// Objects are their own scope. Anything else is wrapped as
/// `{"value": item, "index": index}`.
fn item_scope(index: usize, item: Value) -> Value {
    match item {
        Value::Object(_) => item,
        other => {
            let mut scope = Map::new();
            scope.insert(VALUE_KEY.to_string(), other);
            scope.insert(INDEX_KEY.to_string(), Value::from(index));
            Value::Object(scope)
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
