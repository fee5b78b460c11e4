pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    Arguments, ChildListResolver, CustomFunction, Engine, FunctionEvaluator, FunctionRegistry,
    LintWarning, RenderWarning, ResolvedNode, ResolvedSurface, Resolver, ResolverContext,
    ValidationEngine, ValidationResult, compute_suggestions, lint_surface,
};
pub use parser::{LoadError, ParseError, load_surface, parse_expression, parse_surface};
pub use types::{
    Accessibility, Check, ChildReference, Children, Component, DynamicValue, FunctionCall,
    JsonPointer, Surface,
};

/// Creates a `BTreeMap<String, DynamicValue>` of function arguments.
///
/// Values are converted via `Into<DynamicValue>`, so you can pass integers,
/// floats, booleans, strings (a leading `/` makes a reference), or nested
/// [`FunctionCall`]s directly.
///
/// # Example
///
/// ```
/// use dynval::{DynamicValue, FunctionCall, args};
///
/// let a = args! { "count" => 3, "one" => "item", "other" => "items" };
/// assert_eq!(a.len(), 3);
/// assert_eq!(a["one"], DynamicValue::from("item"));
///
/// let call = FunctionCall::new("pluralize").with_args(args! { "count" => "/cart/size" });
/// assert!(call.arg("count").is_some_and(DynamicValue::is_reference));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        ::std::collections::BTreeMap::<String, $crate::DynamicValue>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, $crate::DynamicValue>::new();
            $(
                map.insert(
                    $key.to_string(),
                    ::std::convert::Into::<$crate::DynamicValue>::into($value),
                );
            )+
            map
        }
    };
}
