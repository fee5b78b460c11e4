//! Recursive surface rendering: resolves every component reachable from the
//! root into a [`ResolvedNode`] tree.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::interpreter::children::ChildListResolver;
use crate::interpreter::context::RenderContext;
use crate::interpreter::error::RenderWarning;
use crate::interpreter::resolver::Resolver;
use crate::interpreter::validation::{ValidationEngine, ValidationResult};
use crate::types::{Children, Surface};

/// A fully resolved surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSurface {
    /// The resolved root, or `None` if the root itself could not be rendered.
    pub root: Option<ResolvedNode>,

    /// Guards that fired during the walk, in the order first seen.
    #[serde(skip)]
    pub warnings: Vec<RenderWarning>,
}

impl ResolvedSurface {
    /// Visit every node, parents before children.
    pub fn nodes(&self) -> Vec<&ResolvedNode> {
        let mut out = Vec::new();
        let mut pending: Vec<&ResolvedNode> = self.root.iter().collect();
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(node.children.iter().rev());
        }
        out
    }
}

/// One rendered component instance.
///
/// A template component appears once per data element, each with its own
/// `scoped_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub id: String,

    #[serde(rename = "component")]
    pub component_type: String,

    /// Scoped data this instance was resolved with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_data: Option<Value>,

    /// Resolved properties. Properties that resolve to nothing are omitted.
    pub properties: BTreeMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<ResolvedAccessibility>,

    /// Present only for components that declare checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedAccessibility {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Render `surface` from its root.
#[instrument(level = "debug", skip_all, fields(root = %surface.root, max_depth = max_depth))]
pub(crate) fn render_surface(
    surface: &Surface,
    resolver: &Resolver<'_>,
    max_depth: usize,
) -> ResolvedSurface {
    let mut ctx = RenderContext::new(max_depth);
    let walker = TreeWalker { surface, resolver: *resolver };

    let root = if surface.root_component().is_some() {
        walker.node(&surface.root, None, &mut ctx)
    } else {
        record(
            &mut ctx,
            RenderWarning::MissingRoot {
                root: surface.root.clone(),
            },
        );
        None
    };

    ResolvedSurface {
        root,
        warnings: ctx.into_warnings(),
    }
}

struct TreeWalker<'a> {
    surface: &'a Surface,
    resolver: Resolver<'a>,
}

impl TreeWalker<'_> {
    fn node(
        &self,
        id: &str,
        scoped: Option<&Value>,
        ctx: &mut RenderContext,
    ) -> Option<ResolvedNode> {
        let component = self.surface.component(id)?;
        if let Err(warning) = ctx.push(id, scoped) {
            record(ctx, warning);
            return None;
        }

        let resolver = match scoped {
            Some(data) => self.resolver.with_scoped_data(data),
            None => self.resolver,
        };

        let properties = component
            .properties
            .iter()
            .filter_map(|(name, expr)| {
                resolver
                    .resolve(expr)
                    .map(|value| (name.clone(), value))
            })
            .collect();
        let weight = component
            .weight
            .as_ref()
            .and_then(|weight| resolver.resolve_float(weight));
        let accessibility = component
            .accessibility
            .as_ref()
            .map(|a| ResolvedAccessibility {
                label: a
                    .label
                    .as_ref()
                    .and_then(|label| resolver.resolve_string(label)),
                description: a
                    .description
                    .as_ref()
                    .and_then(|description| resolver.resolve_string(description)),
            });
        let validation = component
            .checks
            .as_deref()
            .map(|checks| ValidationEngine::new(&resolver).validate(Some(checks)));

        let mut refs = ChildListResolver::new(&resolver).resolve(component.children.as_ref());
        let expanded = match component.children {
            Some(Children::Template { .. }) => ctx.expand(&refs),
            Some(Children::Explicit(_)) | None => Ok(()),
        };
        if let Err(warning) = expanded {
            record(ctx, warning);
            refs.clear();
        }
        let mut children = Vec::with_capacity(refs.len());
        for child in &refs {
            if self.surface.component(&child.component_id).is_none() {
                record(
                    ctx,
                    RenderWarning::MissingComponent {
                        parent: id.to_string(),
                        id: child.component_id.clone(),
                    },
                );
                continue;
            }
            // Static children inherit the enclosing template instance's scope.
            let child_scope = child.scoped_data.as_ref().or(scoped);
            if let Some(node) = self.node(&child.component_id, child_scope, ctx) {
                children.push(node);
            }
        }

        ctx.pop();
        Some(ResolvedNode {
            id: component.id.clone(),
            component_type: component.component_type.clone(),
            scoped_data: scoped.cloned(),
            properties,
            weight,
            accessibility,
            validation,
            children,
        })
    }
}

fn record(ctx: &mut RenderContext, warning: RenderWarning) {
    warn!(%warning, "render guard triggered");
    ctx.add_warning(warning);
}
