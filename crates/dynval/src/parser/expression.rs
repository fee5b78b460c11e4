//! Classification of raw JSON into [`DynamicValue`] expressions.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::types::{DynamicValue, FunctionCall};

/// Key whose string value marks an object as a function call.
pub const CALL_KEY: &str = "call";

/// Key holding a function call's argument object.
pub const ARGS_KEY: &str = "args";

/// Classify a JSON value as an expression.
///
/// The classification happens once, so a data object that merely contains a
/// `call` field is never mistaken for a function call at resolution time:
/// only values that pass through this function as expressions are ever
/// interpreted.
///
/// # Example
///
/// ```
/// use dynval::DynamicValue;
/// use dynval::parser::parse_expression;
/// use serde_json::json;
///
/// let expr = parse_expression(&json!({"call": "not", "args": {"value": "/agreed"}}));
/// let call = expr.as_call().unwrap();
/// assert_eq!(call.name, "not");
/// assert!(call.arg("value").unwrap().is_reference());
///
/// assert!(matches!(parse_expression(&json!({"x": 1})), DynamicValue::Structured(_)));
/// ```
pub fn parse_expression(value: &Value) -> DynamicValue {
    match value {
        Value::Null => DynamicValue::Null,
        Value::Bool(b) => DynamicValue::Bool(*b),
        Value::Number(n) => DynamicValue::Number(n.clone()),
        Value::String(s) => DynamicValue::from(s.as_str()),
        Value::Array(items) => DynamicValue::Sequence(items.iter().map(parse_expression).collect()),
        Value::Object(map) => match map.get(CALL_KEY) {
            Some(Value::String(name)) => DynamicValue::Call(parse_call(name, map)),
            _ => DynamicValue::Structured(map.clone()),
        },
    }
}

/// Build a call from a marked object. A missing or non-object `args` means
/// no arguments.
fn parse_call(name: &str, map: &Map<String, Value>) -> FunctionCall {
    let args: BTreeMap<String, DynamicValue> = match map.get(ARGS_KEY) {
        Some(Value::Object(args)) => args
            .iter()
            .map(|(key, value)| (key.clone(), parse_expression(value)))
            .collect(),
        _ => BTreeMap::new(),
    };
    FunctionCall::new(name).with_args(args)
}

impl From<&Value> for DynamicValue {
    fn from(value: &Value) -> Self {
        parse_expression(value)
    }
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        parse_expression(&value)
    }
}
