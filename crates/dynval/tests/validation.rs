//! Tests for the validation engine.

use dynval::interpreter::FALLBACK_MESSAGE;
use dynval::{
    Check, DynamicValue, FunctionCall, FunctionEvaluator, Resolver, ValidationEngine, args,
};
use serde_json::{Value, json};

fn validate(data: &Value, checks: Option<&[Check]>) -> dynval::ValidationResult {
    let evaluator = FunctionEvaluator::default();
    let resolver = Resolver::new(data, &evaluator);
    ValidationEngine::new(&resolver).validate(checks)
}

fn required(path: &str) -> FunctionCall {
    FunctionCall::new("required").with_arg("value", path)
}

#[test]
fn absent_and_empty_checks_are_valid() {
    let data = json!({});
    for result in [validate(&data, None), validate(&data, Some(&[]))] {
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn failing_check_reports_its_message() {
    let data = json!({"email": "ada@example.com", "name": ""});
    let checks = vec![
        Check::new(
            FunctionCall::new("email").with_arg("value", "/email"),
            "Invalid email",
        ),
        Check::new(required("/name"), "Name is required"),
    ];

    let result = validate(&data, Some(&checks));
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Name is required"]);
}

#[test]
fn every_failure_is_collected_in_order() {
    let data = json!({});
    let checks = vec![
        Check::new(required("/a"), "first"),
        Check::new(true, "never"),
        Check::new(required("/b"), "second"),
        Check::new(required("/c"), "third"),
    ];

    let result = validate(&data, Some(&checks));
    assert_eq!(result.errors, vec!["first", "second", "third"]);
}

#[test]
fn only_exactly_true_passes() {
    let data = json!({"flag": "true", "one": 1, "text": "yes"});
    let checks = vec![
        Check::new("/flag", "string true passes"),
        Check::new("/one", "number fails"),
        Check::new("/text", "text fails"),
        Check::new("/missing", "absent fails"),
        Check::new(DynamicValue::Null, "null fails"),
    ];

    let result = validate(&data, Some(&checks));
    assert_eq!(result.errors, vec!["number fails", "text fails", "absent fails", "null fails"]);
}

#[test]
fn messages_are_resolved() {
    let data = json!({"messages": {"name": "Please enter a name"}});
    let checks = vec![Check::new(required("/name"), "/messages/name")];
    assert_eq!(validate(&data, Some(&checks)).errors, vec!["Please enter a name"]);
}

#[test]
fn messages_can_be_formatted() {
    let data = json!({"limits": {"max": 10}});
    let message = FunctionCall::new("formatString").with_args(args! {
        "template" => "At most ${max} characters",
        "max" => "/limits/max",
    });
    let condition = FunctionCall::new("length").with_args(args! {
        "value" => "this is far too long",
        "max" => "/limits/max",
    });
    let checks = vec![Check::new(condition, message)];
    assert_eq!(validate(&data, Some(&checks)).errors, vec!["At most 10 characters"]);
}

#[test]
fn unresolvable_message_uses_fallback() {
    let data = json!({});
    let checks = vec![
        Check::new(false, "/missing/message"),
        Check::new(false, DynamicValue::Null),
    ];
    let result = validate(&data, Some(&checks));
    assert_eq!(result.errors, vec![FALLBACK_MESSAGE, FALLBACK_MESSAGE]);
    assert_eq!(FALLBACK_MESSAGE, "Validation failed");
}

#[test]
fn validation_reads_scoped_data() {
    let root = json!({});
    let row = json!({"qty": 0});
    let evaluator = FunctionEvaluator::default();
    let resolver = Resolver::new(&root, &evaluator);
    let scoped = resolver.with_scoped_data(&row);

    let checks = vec![Check::new(
        FunctionCall::new("numeric").with_args(args! { "value" => "/qty", "min" => 1 }),
        "Quantity must be at least 1",
    )];
    let result = ValidationEngine::new(&scoped).validate(Some(&checks));
    assert_eq!(result.errors, vec!["Quantity must be at least 1"]);
}

#[test]
fn result_serializes_camel_case() {
    let data = json!({});
    let checks = vec![Check::new(false, "nope")];
    let result = validate(&data, Some(&checks));
    insta::assert_snapshot!(
        serde_json::to_string(&result).unwrap(),
        @r#"{"isValid":false,"errors":["nope"]}"#
    );
}
