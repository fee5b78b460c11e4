use std::collections::BTreeMap;

use bon::Builder;

use super::{DynamicValue, JsonPointer};

/// One node in a surface's flat component map.
///
/// Components never hold their children directly. They carry a [`Children`]
/// expression that the child list resolver turns into concrete references at
/// render time.
///
/// # Example
///
/// ```
/// use dynval::{Children, Component, DynamicValue};
/// use std::collections::BTreeMap;
///
/// let title = Component::builder()
///     .id("title")
///     .component_type("Text")
///     .properties(BTreeMap::from([("text".to_string(), DynamicValue::from("/title"))]))
///     .build();
///
/// let column = Component::builder()
///     .id("main")
///     .component_type("Column")
///     .children(Children::Explicit(vec!["title".to_string()]))
///     .build();
///
/// assert_eq!(title.property("text"), Some(&DynamicValue::from("/title")));
/// assert!(column.checks.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct Component {
    /// Unique id within the surface.
    pub id: String,

    /// Type name (e.g., "Text", "Column"). Interpreted by the renderer only.
    pub component_type: String,

    /// Property name to expression mapping.
    #[builder(default)]
    pub properties: BTreeMap<String, DynamicValue>,

    /// Children expression, if the component has children.
    pub children: Option<Children>,

    /// Validation rules, evaluated in declaration order.
    pub checks: Option<Vec<Check>>,

    /// Accessibility metadata.
    pub accessibility: Option<Accessibility>,

    /// Layout weight. May be data-bound.
    pub weight: Option<DynamicValue>,
}

impl Component {
    /// Get a property expression by name.
    pub fn property(&self, name: &str) -> Option<&DynamicValue> {
        self.properties.get(name)
    }

    /// Visit every expression this component carries.
    pub fn expressions(&self) -> impl Iterator<Item = &DynamicValue> {
        let checks = self
            .checks
            .iter()
            .flatten()
            .flat_map(|check| [&check.condition, &check.message]);
        let accessibility = self
            .accessibility
            .iter()
            .flat_map(|a| a.label.iter().chain(a.description.iter()));
        self.properties
            .values()
            .chain(checks)
            .chain(accessibility)
            .chain(self.weight.iter())
    }
}

/// A component's children expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Static component ids, in order.
    Explicit(Vec<String>),

    /// One component rendered once per element of the array at `path`.
    Template {
        component_id: String,
        path: JsonPointer,
    },
}

impl Children {
    /// Every component id this expression can produce.
    pub fn component_ids(&self) -> Vec<&str> {
        match self {
            Children::Explicit(ids) => ids.iter().map(String::as_str).collect(),
            Children::Template { component_id, .. } => vec![component_id.as_str()],
        }
    }
}

/// A single validation rule: when `condition` does not resolve to exactly
/// `true`, `message` is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Expression expected to resolve to a boolean.
    pub condition: DynamicValue,

    /// Expression expected to resolve to a string.
    pub message: DynamicValue,
}

impl Check {
    /// Create a check from a condition and message.
    pub fn new(condition: impl Into<DynamicValue>, message: impl Into<DynamicValue>) -> Self {
        Self {
            condition: condition.into(),
            message: message.into(),
        }
    }
}

/// Accessibility metadata, resolved as strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accessibility {
    pub label: Option<DynamicValue>,
    pub description: Option<DynamicValue>,
}
