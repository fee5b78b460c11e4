use serde::Serialize;
use serde_json::Value;

/// A concrete child produced by the child list resolver.
///
/// Static children carry no scoped data. Template children share one
/// `component_id` and differ only in `scoped_data`, which the renderer must
/// thread into every resolution of that child's properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildReference {
    pub component_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_data: Option<Value>,
}

impl ChildReference {
    /// A reference to a statically listed child.
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            scoped_data: None,
        }
    }

    /// A reference to one template instance.
    pub fn scoped(component_id: impl Into<String>, scoped_data: Value) -> Self {
        Self {
            component_id: component_id.into(),
            scoped_data: Some(scoped_data),
        }
    }
}
