//! Public AST types for `formatString` templates.
//!
//! These types are public to enable external tooling (linters, editors, etc.).

/// A parsed template string containing segments.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatTemplate {
    pub segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    /// Iterate over the placeholder expressions, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            FormatSegment::Placeholder(expr) => Some(expr.as_str()),
            FormatSegment::Literal(_) => None,
        })
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatSegment {
    /// Literal text (no substitution).
    Literal(String),
    /// A `${expr}` placeholder. `expr` is trimmed; a leading `/` makes it a
    /// data path, otherwise it names a call argument.
    Placeholder(String),
}
