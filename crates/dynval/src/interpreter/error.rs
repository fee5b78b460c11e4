//! Warning types for surface rendering and linting.
//!
//! Neither a render nor a lint ever fails: problems are collected as
//! warnings alongside whatever output could still be produced.

use thiserror::Error;

/// A problem found while walking a surface's component tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderWarning {
    /// A child or template id that is not in the component map.
    #[error("component '{parent}' references missing component '{id}'")]
    MissingComponent { parent: String, id: String },

    /// A component reached again with the same scoped data while it is still
    /// being rendered.
    #[error("cyclic component reference: {}", chain.join(" -> "))]
    CyclicComponent { chain: Vec<String> },

    /// The tree is deeper than the configured limit.
    #[error("maximum depth {max_depth} exceeded at component '{component}'")]
    MaxDepthExceeded { component: String, max_depth: usize },

    /// The surface's root id is not in the component map.
    #[error("root component '{root}' not found")]
    MissingRoot { root: String },
}

/// A static problem in a surface document, found without resolving any data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    #[error(
        "component '{component}' calls unknown function '{name}'{}",
        format_suggestions(suggestions)
    )]
    UnknownFunction {
        component: String,
        name: String,
        suggestions: Vec<String>,
    },

    #[error(
        "component '{component}' references missing component '{id}'{}",
        format_suggestions(suggestions)
    )]
    MissingComponent {
        component: String,
        id: String,
        suggestions: Vec<String>,
    },

    #[error("component '{component}' is unreachable from root")]
    Unreachable { component: String },

    #[error("static child cycle: {}", chain.join(" -> "))]
    ChildCycle { chain: Vec<String> },
}

impl LintWarning {
    /// The component the warning is about. For cycles this is the first
    /// component in the chain.
    pub fn component(&self) -> &str {
        match self {
            LintWarning::UnknownFunction { component, .. }
            | LintWarning::MissingComponent { component, .. }
            | LintWarning::Unreachable { component } => component,
            LintWarning::ChildCycle { chain } => chain.first().map_or("", String::as_str),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions using Levenshtein distance.
///
/// Keys of up to three characters allow a distance of one; longer keys allow
/// two. At most three suggestions are returned, closest first.
///
/// # Example
///
/// ```
/// use dynval::compute_suggestions;
///
/// let names = ["formatNumber", "formatString", "required"];
/// assert_eq!(compute_suggestions("formatNumbr", &names), vec!["formatNumber"]);
/// assert!(compute_suggestions("xyz", &names).is_empty());
/// ```
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|name| {
            let name: &str = name.as_ref();
            let distance = strsim::levenshtein(key, name);
            (distance > 0 && distance <= max_distance).then_some((distance, name))
        })
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
