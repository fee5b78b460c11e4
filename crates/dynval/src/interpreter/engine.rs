//! The user-facing engine: one configured evaluator applied to surfaces.

use bon::Builder;
use serde_json::Value;

use crate::interpreter::children::ChildListResolver;
use crate::interpreter::error::LintWarning;
use crate::interpreter::functions::FunctionEvaluator;
use crate::interpreter::lint::lint_surface_with;
use crate::interpreter::resolver::Resolver;
use crate::interpreter::tree::{ResolvedSurface, render_surface};
use crate::interpreter::validation::{ValidationEngine, ValidationResult};
use crate::types::{ChildReference, DynamicValue, Surface};

/// Default limit on component nesting during [`Engine::render`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resolves, validates, and renders surfaces.
///
/// The engine owns the [`FunctionEvaluator`] and render limits. It holds no
/// per-surface state, so one engine can serve any number of surfaces, and
/// concurrent calls are safe as long as the surfaces are not mutated.
///
/// # Example
///
/// ```
/// use dynval::{Engine, parse_surface};
///
/// let surface = parse_surface(r#"{
///     "root": "list",
///     "components": [
///         {"id": "list", "component": "List",
///          "children": {"componentId": "row", "path": "/items"}},
///         {"id": "row", "component": "Text", "properties": {"text": "/name"}}
///     ],
///     "data": {"items": [{"name": "a"}, {"name": "b"}]}
/// }"#).unwrap();
///
/// let engine = Engine::builder().max_depth(16).build();
/// let rendered = engine.render(&surface);
///
/// let root = rendered.root.unwrap();
/// assert_eq!(root.children.len(), 2);
/// assert_eq!(root.children[1].properties["text"], "b");
/// assert!(rendered.warnings.is_empty());
/// ```
#[derive(Debug, Builder)]
pub struct Engine {
    /// Maximum component nesting depth during rendering.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Evaluator for function calls.
    #[builder(default)]
    evaluator: FunctionEvaluator,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn evaluator(&self) -> &FunctionEvaluator {
        &self.evaluator
    }

    /// Mutable access to the evaluator, for registering custom functions.
    pub fn evaluator_mut(&mut self) -> &mut FunctionEvaluator {
        &mut self.evaluator
    }

    /// A resolver over the surface's root data.
    pub fn resolver<'a>(&'a self, surface: &'a Surface) -> Resolver<'a> {
        Resolver::new(&surface.data, &self.evaluator)
    }

    /// A resolver over the surface's root data, scoped to `scoped` if given.
    fn scoped_resolver<'a>(
        &'a self,
        surface: &'a Surface,
        scoped: Option<&'a Value>,
    ) -> Resolver<'a> {
        let resolver = self.resolver(surface);
        match scoped {
            Some(data) => resolver.with_scoped_data(data),
            None => resolver,
        }
    }

    /// Resolve a single expression against the surface's data, with
    /// optional scoped data.
    pub fn resolve(
        &self,
        surface: &Surface,
        expr: &DynamicValue,
        scoped: Option<&Value>,
    ) -> Option<Value> {
        self.scoped_resolver(surface, scoped).resolve(expr)
    }

    /// Run one component's checks. Returns `None` if the component is not in
    /// the surface.
    pub fn validate_component(
        &self,
        surface: &Surface,
        id: &str,
        scoped: Option<&Value>,
    ) -> Option<ValidationResult> {
        let component = surface.component(id)?;
        let resolver = self.scoped_resolver(surface, scoped);
        Some(ValidationEngine::new(&resolver).validate(component.checks.as_deref()))
    }

    /// Resolve one component's children. Returns `None` if the component is
    /// not in the surface.
    pub fn children(
        &self,
        surface: &Surface,
        id: &str,
        scoped: Option<&Value>,
    ) -> Option<Vec<ChildReference>> {
        let component = surface.component(id)?;
        let resolver = self.scoped_resolver(surface, scoped);
        Some(ChildListResolver::new(&resolver).resolve(component.children.as_ref()))
    }

    /// Render the whole surface from its root.
    pub fn render(&self, surface: &Surface) -> ResolvedSurface {
        render_surface(surface, &self.resolver(surface), self.max_depth)
    }

    /// Lint the surface, treating this engine's custom functions as known.
    pub fn lint(&self, surface: &Surface) -> Vec<LintWarning> {
        lint_surface_with(surface, &self.evaluator)
    }
}
