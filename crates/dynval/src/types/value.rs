use serde_json::{Map, Number, Value};

use super::{FunctionCall, JsonPointer};

/// A property expression, classified once when a document is parsed.
///
/// Every component property, check condition and message, and weight is a
/// `DynamicValue`. Resolving one against a data tree produces a concrete
/// [`serde_json::Value`].
///
/// String conversion follows the document convention: a string beginning with
/// `/` is a path reference, never a literal.
///
/// # Example
///
/// ```
/// use dynval::DynamicValue;
///
/// // Plain strings are literals
/// let title: DynamicValue = "Hello".into();
/// assert!(matches!(title, DynamicValue::String(_)));
///
/// // Strings beginning with `/` are references into the data tree
/// let bound: DynamicValue = "/user/name".into();
/// assert!(bound.is_reference());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DynamicValue {
    /// No value.
    #[default]
    Null,

    /// A boolean literal.
    Bool(bool),

    /// A numeric literal. Integers keep full precision.
    Number(Number),

    /// A string literal (never begins with `/`).
    String(String),

    /// A JSON Pointer into the data tree.
    Reference(JsonPointer),

    /// A call to a named function with lazily resolved arguments.
    Call(FunctionCall),

    /// An array whose elements are resolved one by one.
    Sequence(Vec<DynamicValue>),

    /// An object without a function marker, returned unchanged.
    Structured(Map<String, Value>),
}

impl DynamicValue {
    /// Check if this expression is a path reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, DynamicValue::Reference(_))
    }

    /// Check if this expression is a function call.
    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            DynamicValue::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Get the elements of a sequence expression.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Visit this expression and every nested call argument and sequence element.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DynamicValue)) {
        visit(self);
        match self {
            DynamicValue::Call(call) => {
                for arg in call.args.values() {
                    arg.walk(visit);
                }
            }
            DynamicValue::Sequence(items) => {
                for item in items {
                    item.walk(visit);
                }
            }
            DynamicValue::Null
            | DynamicValue::Bool(_)
            | DynamicValue::Number(_)
            | DynamicValue::String(_)
            | DynamicValue::Reference(_)
            | DynamicValue::Structured(_) => {}
        }
    }
}

// From implementations for common types

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<i32> for DynamicValue {
    fn from(n: i32) -> Self {
        DynamicValue::Number(Number::from(n))
    }
}

impl From<i64> for DynamicValue {
    fn from(n: i64) -> Self {
        DynamicValue::Number(Number::from(n))
    }
}

impl From<u64> for DynamicValue {
    fn from(n: u64) -> Self {
        DynamicValue::Number(Number::from(n))
    }
}

impl From<usize> for DynamicValue {
    fn from(n: usize) -> Self {
        DynamicValue::Number(Number::from(n))
    }
}

impl From<f64> for DynamicValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(DynamicValue::Null, DynamicValue::Number)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        if s.starts_with('/') {
            DynamicValue::Reference(JsonPointer::parse(s))
        } else {
            DynamicValue::String(s.to_string())
        }
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        if s.starts_with('/') {
            DynamicValue::Reference(JsonPointer::parse(&s))
        } else {
            DynamicValue::String(s)
        }
    }
}

impl From<JsonPointer> for DynamicValue {
    fn from(pointer: JsonPointer) -> Self {
        DynamicValue::Reference(pointer)
    }
}

impl From<FunctionCall> for DynamicValue {
    fn from(call: FunctionCall) -> Self {
        DynamicValue::Call(call)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(items: Vec<DynamicValue>) -> Self {
        DynamicValue::Sequence(items)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DynamicValue::Null, Into::into)
    }
}
