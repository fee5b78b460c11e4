//! Static lint rules for surface documents.
//!
//! Analyzes the component graph and expressions without resolving any data,
//! catching authoring mistakes that resolution would otherwise silently
//! degrade into blanks.

use std::collections::{BTreeMap, BTreeSet};

use dynval_semantics::builtin_function_names;

use crate::interpreter::error::{LintWarning, compute_suggestions};
use crate::interpreter::functions::FunctionEvaluator;
use crate::types::Surface;

/// Runs every lint rule using only the built-in function library.
///
/// # Example
///
/// ```
/// use dynval::{LintWarning, lint_surface, parse_surface};
///
/// let surface = parse_surface(r#"{
///     "root": "main",
///     "components": [
///         {"id": "main", "component": "Text",
///          "properties": {"text": {"call": "formatNumbr", "args": {"value": 1}}}},
///         {"id": "orphan", "component": "Text"}
///     ]
/// }"#).unwrap();
///
/// let warnings = lint_surface(&surface);
/// assert_eq!(warnings.len(), 2);
/// assert!(matches!(
///     &warnings[0],
///     LintWarning::UnknownFunction { name, .. } if name == "formatNumbr"
/// ));
/// assert!(matches!(
///     &warnings[1],
///     LintWarning::Unreachable { component } if component == "orphan"
/// ));
/// ```
pub fn lint_surface(surface: &Surface) -> Vec<LintWarning> {
    lint_surface_with(surface, &FunctionEvaluator::default())
}

/// Runs every lint rule, treating the evaluator's custom functions as known.
///
/// Warnings are grouped by rule: unknown functions, missing components,
/// unreachable components, then cycles. Within a rule they follow component
/// id order.
pub fn lint_surface_with(surface: &Surface, evaluator: &FunctionEvaluator) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    lint_unknown_functions(surface, evaluator, &mut warnings);
    lint_missing_components(surface, &mut warnings);
    lint_unreachable(surface, &mut warnings);
    lint_child_cycles(surface, &mut warnings);
    warnings
}

fn lint_unknown_functions(
    surface: &Surface,
    evaluator: &FunctionEvaluator,
    warnings: &mut Vec<LintWarning>,
) {
    let known: Vec<&str> = builtin_function_names()
        .iter()
        .copied()
        .chain(evaluator.registry().names())
        .collect();

    for component in surface.components.values() {
        let mut unknown = BTreeSet::new();
        for expr in component.expressions() {
            expr.walk(&mut |node| {
                if let Some(call) = node.as_call().filter(|call| !evaluator.is_known(&call.name)) {
                    unknown.insert(call.name.as_str());
                }
            });
        }
        for name in unknown {
            warnings.push(LintWarning::UnknownFunction {
                component: component.id.clone(),
                name: name.to_string(),
                suggestions: compute_suggestions(name, &known),
            });
        }
    }
}

fn lint_missing_components(surface: &Surface, warnings: &mut Vec<LintWarning>) {
    let ids: Vec<&str> = surface
        .components
        .keys()
        .map(String::as_str)
        .collect();
    for component in surface.components.values() {
        let Some(children) = &component.children else {
            continue;
        };
        let mut reported = BTreeSet::new();
        for id in children.component_ids() {
            if surface.component(id).is_none() && reported.insert(id) {
                warnings.push(LintWarning::MissingComponent {
                    component: component.id.clone(),
                    id: id.to_string(),
                    suggestions: compute_suggestions(id, &ids),
                });
            }
        }
    }
}

fn lint_unreachable(surface: &Surface, warnings: &mut Vec<LintWarning>) {
    let mut reachable = BTreeSet::new();
    let mut pending = vec![surface.root.as_str()];
    while let Some(id) = pending.pop() {
        if !reachable.insert(id) {
            continue;
        }
        pending.extend(child_ids(surface, id));
    }

    for id in surface.components.keys() {
        if !reachable.contains(id.as_str()) {
            warnings.push(LintWarning::Unreachable {
                component: id.clone(),
            });
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Depth-first search over child edges. Every back edge is one cycle.
///
/// The search keeps its own stack of `(component, children, next child)`
/// frames so that long static chains cannot exhaust the thread's stack.
fn lint_child_cycles(surface: &Surface, warnings: &mut Vec<LintWarning>) {
    let mut state: BTreeMap<&str, Visit> = BTreeMap::new();
    for start in surface.components.keys() {
        if state.contains_key(start.as_str()) {
            continue;
        }
        state.insert(start.as_str(), Visit::InProgress);
        let mut stack = vec![(start.as_str(), child_ids(surface, start), 0)];

        while let Some((id, children, next)) = stack.last_mut() {
            let Some(&child) = children.get(*next) else {
                state.insert(*id, Visit::Done);
                stack.pop();
                continue;
            };
            *next += 1;

            match state.get(child) {
                Some(Visit::InProgress) => {
                    let from = stack
                        .iter()
                        .position(|(active, ..)| *active == child)
                        .unwrap_or(0);
                    let mut chain: Vec<String> = stack[from..]
                        .iter()
                        .map(|(active, ..)| active.to_string())
                        .collect();
                    chain.push(child.to_string());
                    warnings.push(LintWarning::ChildCycle { chain });
                }
                Some(Visit::Done) => {}
                None => {
                    state.insert(child, Visit::InProgress);
                    stack.push((child, child_ids(surface, child), 0));
                }
            }
        }
    }
}

/// Declared children of `id` that exist in the surface.
fn child_ids<'a>(surface: &'a Surface, id: &str) -> Vec<&'a str> {
    surface
        .component(id)
        .and_then(|component| component.children.as_ref())
        .map(|children| {
            children
                .component_ids()
                .into_iter()
                .filter(|child| surface.component(child).is_some())
                .collect()
        })
        .unwrap_or_default()
}
