//! The resolution engine.
//!
//! This module turns parsed expressions into concrete values. The
//! [`Resolver`] looks up data and hands function calls to the
//! [`FunctionEvaluator`], which calls back into the resolver for each argument
//! it needs. Validation, child list expansion, and the full surface walk are
//! built on top of those two.

pub mod coerce;
mod children;
mod context;
mod engine;
mod error;
mod format;
mod functions;
mod lint;
mod plural;
mod registry;
mod resolver;
mod tree;
mod validation;

pub use children::{ChildListResolver, INDEX_KEY, VALUE_KEY};
pub use context::{RenderContext, ResolverContext};
pub use engine::{DEFAULT_MAX_DEPTH, Engine};
pub use error::{LintWarning, RenderWarning, compute_suggestions};
pub use format::{MAX_DECIMALS, clamp_decimals, format_currency, format_number};
pub use functions::{Arguments, FunctionEvaluator, OpenUrlHandler};
pub use lint::{lint_surface, lint_surface_with};
pub use plural::{PLURAL_CATEGORIES, plural_category};
pub use registry::{CustomFunction, FunctionRegistry};
pub use resolver::Resolver;
pub use tree::{ResolvedAccessibility, ResolvedNode, ResolvedSurface};
pub use validation::{FALLBACK_MESSAGE, ValidationEngine, ValidationResult};
