//! The validation engine: evaluates a component's checks.

use serde::Serialize;

use crate::interpreter::resolver::Resolver;
use crate::types::Check;

/// Message used when a failing check's own message cannot be resolved.
pub const FALLBACK_MESSAGE: &str = "Validation failed";

/// The outcome of running a list of checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Messages of every failing check, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no errors.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

/// Runs checks through a [`Resolver`].
///
/// A condition passes only if it resolves to exactly `true`. Every check is
/// evaluated, so the result lists all violated rules, not just the first.
///
/// # Example
///
/// ```
/// use dynval::{Check, FunctionCall, FunctionEvaluator, Resolver, ValidationEngine};
/// use serde_json::json;
///
/// let data = json!({"name": ""});
/// let evaluator = FunctionEvaluator::default();
/// let resolver = Resolver::new(&data, &evaluator);
///
/// let checks = vec![Check::new(
///     FunctionCall::new("required").with_arg("value", "/name"),
///     "Name is required",
/// )];
/// let result = ValidationEngine::new(&resolver).validate(Some(&checks));
///
/// assert!(!result.is_valid);
/// assert_eq!(result.errors, vec!["Name is required"]);
/// ```
#[derive(Clone, Copy)]
pub struct ValidationEngine<'r> {
    resolver: &'r Resolver<'r>,
}

impl<'r> ValidationEngine<'r> {
    pub fn new(resolver: &'r Resolver<'r>) -> Self {
        Self { resolver }
    }

    /// Evaluate checks in order. Absent and empty lists are valid.
    pub fn validate(&self, checks: Option<&[Check]>) -> ValidationResult {
        let errors: Vec<String> = checks
            .unwrap_or_default()
            .iter()
            .filter(|check| self.resolver.resolve_bool(&check.condition) != Some(true))
            .map(|check| {
                self.resolver
                    .resolve_string(&check.message)
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
            })
            .collect();

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
