//! Registry for host-defined functions.
//!
//! Hosts can extend the evaluator with their own functions. Built-in functions
//! always take precedence: a custom function registered under a built-in name
//! is stored but never called.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::interpreter::functions::Arguments;

/// Custom function signature.
///
/// The function reads its arguments through [`Arguments`], which resolves them
/// against the caller's context. Returning `None` means "no value".
pub type CustomFunction = fn(&Arguments<'_>) -> Option<Value>;

/// Registry for custom functions, keyed by case-sensitive name.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, CustomFunction>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, returning any function previously registered
    /// under the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: CustomFunction,
    ) -> Option<CustomFunction> {
        self.functions.insert(name.into(), function)
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<CustomFunction> {
        self.functions.get(name).copied()
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
