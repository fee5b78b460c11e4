use std::collections::BTreeMap;

use bon::Builder;
use serde_json::{Map, Value};

use super::Component;

/// A parsed surface: a root component id, the flat component map, and the
/// data tree every binding resolves against.
///
/// A surface is an immutable snapshot. Updates replace it wholesale, so any
/// number of threads may resolve against the same surface at once.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct Surface {
    /// Id of the component rendering starts from.
    pub root: String,

    /// Components keyed by id.
    #[builder(default)]
    pub components: BTreeMap<String, Component>,

    /// The data tree. Defaults to an empty object.
    #[builder(default = Value::Object(Map::new()))]
    pub data: Value,
}

impl Surface {
    /// Create a surface from a list of components.
    ///
    /// Later components replace earlier ones with the same id.
    pub fn new(
        root: impl Into<String>,
        components: impl IntoIterator<Item = Component>,
        data: Value,
    ) -> Self {
        Self {
            root: root.into(),
            components: components
                .into_iter()
                .map(|component| (component.id.clone(), component))
                .collect(),
            data,
        }
    }

    /// Get a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Get the root component, if it is declared.
    pub fn root_component(&self) -> Option<&Component> {
        self.components.get(&self.root)
    }
}
