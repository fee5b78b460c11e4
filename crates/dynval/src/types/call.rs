use std::collections::BTreeMap;

use super::DynamicValue;

/// A named function call with unresolved arguments.
///
/// Arguments stay as expressions until the function itself asks for them, so
/// each built-in can pick the coercion it needs and an unresolvable argument
/// only affects that one function.
///
/// # Example
///
/// ```
/// use dynval::{FunctionCall, args};
///
/// let call = FunctionCall::new("length")
///     .with_args(args! { "value" => "/name", "min" => 2 });
///
/// assert_eq!(call.name, "length");
/// assert!(call.arg("value").unwrap().is_reference());
/// assert!(call.arg("max").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionCall {
    /// Function name as written in the document (e.g., "formatCurrency").
    pub name: String,

    /// Argument name to expression mapping.
    pub args: BTreeMap<String, DynamicValue>,
}

impl FunctionCall {
    /// Create a call with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: BTreeMap::new(),
        }
    }

    /// Replace the argument map.
    pub fn with_args(mut self, args: BTreeMap<String, DynamicValue>) -> Self {
        self.args = args;
        self
    }

    /// Add or replace a single argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Get an argument expression by name.
    pub fn arg(&self, name: &str) -> Option<&DynamicValue> {
        self.args.get(name)
    }
}
