//! The value resolver: turns a [`DynamicValue`] into a concrete value.
//!
//! Resolution is a pure read of the data tree. Every failure (missing path,
//! bad index, unknown function) degrades to `None`.

use serde_json::Value;

use crate::interpreter::coerce;
use crate::interpreter::context::ResolverContext;
use crate::interpreter::functions::FunctionEvaluator;
use crate::types::{DynamicValue, JsonPointer};

/// Resolves expressions against a [`ResolverContext`].
///
/// Function calls are handed to the [`FunctionEvaluator`], which calls back
/// into the resolver for each argument it needs. A resolver is cheap to
/// create: it only borrows its data and evaluator.
///
/// # Example
///
/// ```
/// use dynval::{FunctionEvaluator, Resolver};
/// use serde_json::json;
///
/// let data = json!({"user": {"name": "Ada"}});
/// let evaluator = FunctionEvaluator::default();
/// let resolver = Resolver::new(&data, &evaluator);
///
/// assert_eq!(resolver.resolve(&"/user/name".into()), Some(json!("Ada")));
/// assert_eq!(resolver.resolve(&"Hello".into()), Some(json!("Hello")));
/// assert_eq!(resolver.resolve(&"/user/age".into()), None);
///
/// let row = json!({"name": "Grace"});
/// let scoped = resolver.with_scoped_data(&row);
/// assert_eq!(scoped.resolve_string(&"/name".into()).as_deref(), Some("Grace"));
/// ```
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    context: ResolverContext<'a>,
    evaluator: &'a FunctionEvaluator,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the root data tree.
    pub fn new(root: &'a Value, evaluator: &'a FunctionEvaluator) -> Self {
        Self {
            context: ResolverContext::new(root),
            evaluator,
        }
    }

    /// Create a resolver over an existing context.
    pub fn with_context(context: ResolverContext<'a>, evaluator: &'a FunctionEvaluator) -> Self {
        Self { context, evaluator }
    }

    /// Create a resolver with the same root data and the given scoped data.
    pub fn with_scoped_data<'b>(&self, scoped: &'b Value) -> Resolver<'b>
    where
        'a: 'b,
    {
        Resolver {
            context: self.context.with_scoped_data(scoped),
            evaluator: self.evaluator,
        }
    }

    /// The context this resolver reads from.
    pub fn context(&self) -> &ResolverContext<'a> {
        &self.context
    }

    /// The evaluator function calls are delegated to.
    pub fn evaluator(&self) -> &'a FunctionEvaluator {
        self.evaluator
    }

    /// Resolve an expression.
    ///
    /// - `Null` resolves to `None`
    /// - Literals are returned unchanged
    /// - References are looked up, scoped data first
    /// - Function calls are evaluated
    /// - Sequences are resolved element-wise, dropping elements that resolve
    ///   to nothing
    /// - Structured objects are returned unchanged
    ///
    /// Never returns `Some(Value::Null)`.
    pub fn resolve(&self, expr: &DynamicValue) -> Option<Value> {
        match expr {
            DynamicValue::Null => None,
            DynamicValue::Bool(b) => Some(Value::Bool(*b)),
            DynamicValue::Number(n) => Some(Value::Number(n.clone())),
            DynamicValue::String(s) => Some(Value::String(s.clone())),
            DynamicValue::Reference(pointer) => self.resolve_json_pointer(pointer),
            DynamicValue::Call(call) => self
                .evaluator
                .evaluate(call, self)
                .filter(|value| !value.is_null()),
            DynamicValue::Sequence(items) => Some(Value::Array(
                items.iter().filter_map(|item| self.resolve(item)).collect(),
            )),
            DynamicValue::Structured(map) => Some(Value::Object(map.clone())),
        }
    }

    /// Look up a pointer, scoped data first, then root data.
    ///
    /// An explicit JSON `null` at the path resolves to `None`.
    pub fn resolve_json_pointer(&self, pointer: &JsonPointer) -> Option<Value> {
        self.context
            .lookup(pointer)
            .filter(|value| !value.is_null())
            .cloned()
    }

    /// Parse and look up a pointer string. `""` and `"/"` address the root.
    pub fn resolve_path(&self, path: &str) -> Option<Value> {
        self.resolve_json_pointer(&JsonPointer::parse(path))
    }

    /// Resolve and coerce to a string.
    pub fn resolve_string(&self, expr: &DynamicValue) -> Option<String> {
        self.resolve(expr).as_ref().and_then(coerce::as_string)
    }

    /// Resolve and coerce to a boolean.
    pub fn resolve_bool(&self, expr: &DynamicValue) -> Option<bool> {
        self.resolve(expr).as_ref().and_then(coerce::as_bool)
    }

    /// Resolve and coerce to an integer.
    pub fn resolve_number(&self, expr: &DynamicValue) -> Option<i64> {
        self.resolve(expr).as_ref().and_then(coerce::as_i64)
    }

    /// Resolve and coerce to a float.
    pub fn resolve_float(&self, expr: &DynamicValue) -> Option<f64> {
        self.resolve(expr).as_ref().and_then(coerce::as_f64)
    }

    /// Resolve and coerce to a list of strings.
    pub fn resolve_string_list(&self, expr: &DynamicValue) -> Option<Vec<String>> {
        self.resolve(expr).as_ref().and_then(coerce::as_string_list)
    }
}
