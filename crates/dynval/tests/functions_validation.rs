//! Tests for the validation functions: required, regex, length, numeric, email.

use dynval::parser::parse_expression;
use dynval::{FunctionEvaluator, Resolver};
use serde_json::{Value, json};

fn eval(data: &Value, call: Value) -> Option<Value> {
    let evaluator = FunctionEvaluator::default();
    Resolver::new(data, &evaluator).resolve(&parse_expression(&call))
}

fn check(name: &str, args: Value) -> bool {
    let data = json!({"present": "x", "empty": ""});
    eval(&data, json!({"call": name, "args": args})) == Some(json!(true))
}

// =============================================================================
// required
// =============================================================================

#[test]
fn required_rejects_empty_string() {
    assert!(!check("required", json!({"value": ""})));
    assert!(!check("required", json!({"value": "/empty"})));
}

#[test]
fn required_accepts_non_empty_string() {
    assert!(check("required", json!({"value": "x"})));
    assert!(check("required", json!({"value": "/present"})));
}

#[test]
fn required_rejects_absent() {
    assert!(!check("required", json!({"value": "/missing"})));
    assert!(!check("required", json!({"value": null})));
    assert!(!check("required", json!({})));
}

#[test]
fn required_accepts_any_other_present_value() {
    assert!(check("required", json!({"value": 0})));
    assert!(check("required", json!({"value": false})));
    assert!(check("required", json!({"value": []})));
}

#[test]
fn required_always_returns_a_boolean() {
    let data = json!({});
    assert_eq!(
        eval(&data, json!({"call": "required", "args": {"value": "/missing"}})),
        Some(json!(false))
    );
}

// =============================================================================
// regex
// =============================================================================

#[test]
fn regex_searches_substrings() {
    assert!(check("regex", json!({"value": "order-123", "pattern": "\\d+"})));
    assert!(!check("regex", json!({"value": "order-123", "pattern": "^\\d+$"})));
}

#[test]
fn regex_invalid_pattern_is_false() {
    assert!(!check("regex", json!({"value": "abc", "pattern": "(unclosed"})));
}

#[test]
fn regex_missing_inputs_are_false() {
    assert!(!check("regex", json!({"value": "abc"})));
    assert!(!check("regex", json!({"pattern": "a"})));
}

#[test]
fn regex_coerces_numbers_to_strings() {
    assert!(check("regex", json!({"value": 2024, "pattern": "^20"})));
}

// =============================================================================
// length
// =============================================================================

#[test]
fn length_within_bounds() {
    assert!(check("length", json!({"value": "test", "min": 2, "max": 10})));
    assert!(!check("length", json!({"value": "a", "min": 2, "max": 10})));
    assert!(!check("length", json!({"value": "abcdefghijk", "min": 2, "max": 10})));
}

#[test]
fn length_bounds_are_inclusive() {
    assert!(check("length", json!({"value": "ab", "min": 2, "max": 2})));
}

#[test]
fn length_defaults_to_unbounded() {
    assert!(check("length", json!({"value": ""})));
    assert!(check("length", json!({"value": "x".repeat(1000)})));
    assert!(!check("length", json!({"value": "abc", "max": 2})));
}

#[test]
fn length_counts_graphemes() {
    // Thumbs up with a skin tone modifier is two scalars but one character.
    assert!(check("length", json!({"value": "👍🏽", "min": 1, "max": 1})));
    assert!(check("length", json!({"value": "héllo", "min": 5, "max": 5})));
}

#[test]
fn length_of_absent_value_is_false() {
    assert!(!check("length", json!({"value": "/missing", "min": 0})));
}

// =============================================================================
// numeric
// =============================================================================

#[test]
fn numeric_within_bounds() {
    assert!(check("numeric", json!({"value": 5, "min": 1, "max": 10})));
    assert!(!check("numeric", json!({"value": 11, "min": 1, "max": 10})));
    assert!(!check("numeric", json!({"value": 0.5, "min": 1})));
}

#[test]
fn numeric_accepts_numeric_strings() {
    assert!(check("numeric", json!({"value": "7.5", "max": 8})));
    assert!(!check("numeric", json!({"value": "seven"})));
}

#[test]
fn numeric_without_bounds_only_requires_a_number() {
    assert!(check("numeric", json!({"value": -3})));
    assert!(!check("numeric", json!({"value": true})));
}

// =============================================================================
// email
// =============================================================================

#[test]
fn email_accepts_addresses() {
    assert!(check("email", json!({"value": "test@example.com"})));
    assert!(check("email", json!({"value": "first.last+tag@mail.example.org"})));
}

#[test]
fn email_rejects_non_addresses() {
    assert!(!check("email", json!({"value": "not-email"})));
    assert!(!check("email", json!({"value": "a@b"})));
    assert!(!check("email", json!({"value": "a b@example.com"})));
    assert!(!check("email", json!({"value": "/missing"})));
}
