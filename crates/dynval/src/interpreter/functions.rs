//! The function evaluator and the built-in function library.
//!
//! Every function receives its arguments unevaluated and resolves them through
//! the caller's [`Resolver`], so arguments can themselves be references or
//! nested calls. Built-ins never fail: a missing or mistyped argument produces
//! the documented default for that function.

use std::fmt;
use std::sync::{Arc, LazyLock};

use bon::Builder;
use dynval_semantics::{FunctionId, resolve_function};
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::coerce;
use crate::interpreter::format::{clamp_decimals, format_currency, format_number};
use crate::interpreter::plural::plural_category;
use crate::interpreter::registry::{CustomFunction, FunctionRegistry};
use crate::interpreter::resolver::Resolver;
use crate::parser::{FormatSegment, parse_format_template};
use crate::types::{DynamicValue, FunctionCall};

/// Callback invoked by `openUrl` with the resolved URL.
pub type OpenUrlHandler = Arc<dyn Fn(&str) + Send + Sync>;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern should compile")
});

/// Evaluates [`FunctionCall`]s.
///
/// Names are matched case-sensitively against the built-in library first,
/// then against the custom [`FunctionRegistry`]. Unknown names evaluate to
/// `None`.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use dynval::{FunctionCall, FunctionEvaluator, Resolver};
/// use serde_json::{json, Value};
///
/// let opened = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&opened);
/// let evaluator = FunctionEvaluator::builder()
///     .open_url(Arc::new(move |url: &str| {
///         if let Ok(mut urls) = sink.lock() {
///             urls.push(url.to_string());
///         }
///     }))
///     .build();
///
/// let data = json!({"links": {"docs": "https://example.com/docs"}});
/// let resolver = Resolver::new(&data, &evaluator);
/// let call = FunctionCall::new("openUrl").with_arg("url", "/links/docs");
///
/// assert_eq!(resolver.resolve(&call.into()), Some(Value::Bool(true)));
/// assert_eq!(opened.lock().map(|urls| urls.len()).unwrap_or(0), 1);
/// ```
#[derive(Default, Builder)]
pub struct FunctionEvaluator {
    /// Host callback for `openUrl`. Absent means `openUrl` is a no-op.
    open_url: Option<OpenUrlHandler>,

    /// Host-defined functions consulted after the built-ins.
    #[builder(default)]
    registry: FunctionRegistry,
}

impl fmt::Debug for FunctionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEvaluator")
            .field("open_url", &self.open_url.is_some())
            .field("registry", &self.registry)
            .finish()
    }
}

impl FunctionEvaluator {
    /// Create an evaluator with no `openUrl` handler and no custom functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator that forwards `openUrl` to `handler`.
    pub fn with_open_url(handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self::builder().open_url(Arc::new(handler)).build()
    }

    /// The custom function registry.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Mutable access to the custom function registry.
    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    /// Register a custom function. See [`FunctionRegistry::register`].
    pub fn register(&mut self, name: impl Into<String>, function: CustomFunction) {
        self.registry.register(name, function);
    }

    /// Check if a name refers to a built-in or registered function.
    pub fn is_known(&self, name: &str) -> bool {
        resolve_function(name).is_some() || self.registry.contains(name)
    }

    /// Evaluate a call, resolving its arguments through `resolver`.
    pub fn evaluate(&self, call: &FunctionCall, resolver: &Resolver<'_>) -> Option<Value> {
        let args = Arguments::new(call, resolver);
        if let Some(id) = resolve_function(&call.name) {
            return self.evaluate_builtin(id, &args);
        }
        if let Some(function) = self.registry.get(&call.name) {
            return function(&args);
        }
        debug!(function = %call.name, "unknown function");
        None
    }

    fn evaluate_builtin(&self, id: FunctionId, args: &Arguments<'_>) -> Option<Value> {
        match id {
            FunctionId::Required => Some(Value::Bool(required(args))),
            FunctionId::Regex => Some(Value::Bool(regex(args))),
            FunctionId::Length => Some(Value::Bool(length(args))),
            FunctionId::Numeric => Some(Value::Bool(numeric(args))),
            FunctionId::Email => Some(Value::Bool(email(args))),
            FunctionId::FormatString => Some(Value::String(format_string(args))),
            FunctionId::FormatNumber => {
                let value = args.float("value")?;
                let decimals = clamp_decimals(args.number("decimals"), 0);
                let grouping = args.bool("grouping").unwrap_or(false);
                Some(Value::String(format_number(value, decimals, grouping)))
            }
            FunctionId::FormatCurrency => {
                let value = args.float("value")?;
                let currency = args.string("currency").unwrap_or_else(|| "USD".to_string());
                let decimals = clamp_decimals(args.number("decimals"), 2);
                Some(Value::String(format_currency(value, &currency, decimals)))
            }
            FunctionId::FormatDate => args.string("value").map(Value::String),
            FunctionId::Pluralize => Some(Value::String(pluralize(args))),
            FunctionId::And => Some(Value::Bool(all_values(args))),
            FunctionId::Or => Some(Value::Bool(any_value(args))),
            FunctionId::Not => Some(Value::Bool(args.bool("value").is_none_or(|b| !b))),
            FunctionId::OpenUrl => {
                self.open_url(args);
                Some(Value::Bool(true))
            }
        }
    }

    fn open_url(&self, args: &Arguments<'_>) {
        let Some(url) = args.string("url") else {
            debug!("openUrl without a resolvable url");
            return;
        };
        match &self.open_url {
            Some(handler) => {
                debug!(%url, "openUrl");
                handler(&url);
            }
            None => debug!(%url, "openUrl with no handler installed"),
        }
    }
}

/// The arguments of one call, resolved on demand against the caller's
/// context.
///
/// Custom functions receive this through [`CustomFunction`].
#[derive(Clone, Copy)]
pub struct Arguments<'a> {
    call: &'a FunctionCall,
    resolver: &'a Resolver<'a>,
}

impl<'a> Arguments<'a> {
    pub fn new(call: &'a FunctionCall, resolver: &'a Resolver<'a>) -> Self {
        Self { call, resolver }
    }

    /// The function name as written.
    pub fn name(&self) -> &'a str {
        &self.call.name
    }

    /// The resolver arguments are evaluated with.
    pub fn resolver(&self) -> &'a Resolver<'a> {
        self.resolver
    }

    /// The unevaluated argument expression.
    pub fn raw(&self, name: &str) -> Option<&'a DynamicValue> {
        self.call.arg(name)
    }

    /// Argument names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> {
        self.call.args.keys().map(String::as_str)
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.raw(name).and_then(|expr| self.resolver.resolve(expr))
    }

    pub fn string(&self, name: &str) -> Option<String> {
        self.raw(name)
            .and_then(|expr| self.resolver.resolve_string(expr))
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.raw(name)
            .and_then(|expr| self.resolver.resolve_bool(expr))
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        self.raw(name)
            .and_then(|expr| self.resolver.resolve_number(expr))
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.raw(name)
            .and_then(|expr| self.resolver.resolve_float(expr))
    }
}

/// Present and, for strings, non-empty.
fn required(args: &Arguments<'_>) -> bool {
    match args.value("value") {
        None => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn regex(args: &Arguments<'_>) -> bool {
    let (Some(value), Some(pattern)) = (args.string("value"), args.string("pattern")) else {
        return false;
    };
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(&value),
        Err(e) => {
            debug!(%pattern, error = %e, "invalid regex pattern");
            false
        }
    }
}

/// Length in grapheme clusters within `[min, max]`.
fn length(args: &Arguments<'_>) -> bool {
    let Some(value) = args.string("value") else {
        return false;
    };
    let len = i64::try_from(value.graphemes(true).count()).unwrap_or(i64::MAX);
    let min = args.number("min").unwrap_or(0);
    len >= min && args.number("max").is_none_or(|max| len <= max)
}

fn numeric(args: &Arguments<'_>) -> bool {
    let Some(value) = args.float("value") else {
        return false;
    };
    args.float("min").is_none_or(|min| value >= min)
        && args.float("max").is_none_or(|max| value <= max)
}

fn email(args: &Arguments<'_>) -> bool {
    args.string("value").is_some_and(|value| EMAIL.is_match(&value))
}

/// Substitute `${...}` placeholders. A placeholder starting with `/` is a
/// data path; anything else names another argument of the same call.
fn format_string(args: &Arguments<'_>) -> String {
    let Some(template) = args
        .string("template")
        .or_else(|| args.string("value"))
    else {
        return String::new();
    };
    let parsed = match parse_format_template(&template) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(%template, error = %e, "unparseable format template");
            return template;
        }
    };

    let mut out = String::with_capacity(template.len());
    for segment in &parsed.segments {
        match segment {
            FormatSegment::Literal(text) => out.push_str(text),
            FormatSegment::Placeholder(expr) => {
                let substituted = if expr.starts_with('/') {
                    args.resolver()
                        .resolve_path(expr)
                        .as_ref()
                        .and_then(coerce::as_string)
                } else {
                    args.string(expr)
                };
                out.push_str(&substituted.unwrap_or_default());
            }
        }
    }
    out
}

fn pluralize(args: &Arguments<'_>) -> String {
    let category = args.float("count").map_or("other", plural_category);
    args.string(category)
        .or_else(|| args.string("other"))
        .unwrap_or_default()
}

/// `and`: an absent `values` is false, an empty list is true.
fn all_values(args: &Arguments<'_>) -> bool {
    match values(args) {
        Some(values) => values.iter().all(|v| coerce::as_bool(v) == Some(true)),
        None => false,
    }
}

/// `or`: an absent `values` and an empty list are both false.
fn any_value(args: &Arguments<'_>) -> bool {
    match values(args) {
        Some(values) => values.iter().any(|v| coerce::as_bool(v) == Some(true)),
        None => false,
    }
}

/// Resolve the `values` argument to a list.
///
/// A literal list is resolved element by element, keeping unresolvable
/// elements as `null` so they count as not-true. A reference or call must
/// resolve to an array.
fn values(args: &Arguments<'_>) -> Option<Vec<Value>> {
    match args.raw("values")? {
        DynamicValue::Sequence(items) => Some(
            items
                .iter()
                .map(|item| args.resolver().resolve(item).unwrap_or(Value::Null))
                .collect(),
        ),
        other => match args.resolver().resolve(other)? {
            Value::Array(items) => Some(items),
            _ => None,
        },
    }
}
