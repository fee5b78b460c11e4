//! Shared dynval semantic tables used by both the runtime and static tooling.
//!
//! This crate centralizes built-in function name resolution and the currency
//! symbol table so that evaluation (`dynval`) and linting (`dynval::lint_surface`,
//! `dynval check`) never drift apart.

/// Canonical built-in function identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    Required,
    Regex,
    Length,
    Numeric,
    Email,
    FormatString,
    FormatNumber,
    FormatCurrency,
    FormatDate,
    Pluralize,
    And,
    Or,
    Not,
    OpenUrl,
}

impl FunctionId {
    /// Every built-in function, in documentation order.
    pub const ALL: [FunctionId; 14] = [
        FunctionId::Required,
        FunctionId::Regex,
        FunctionId::Length,
        FunctionId::Numeric,
        FunctionId::Email,
        FunctionId::FormatString,
        FunctionId::FormatNumber,
        FunctionId::FormatCurrency,
        FunctionId::FormatDate,
        FunctionId::Pluralize,
        FunctionId::And,
        FunctionId::Or,
        FunctionId::Not,
        FunctionId::OpenUrl,
    ];

    /// The name a document uses to call this function.
    pub const fn name(self) -> &'static str {
        match self {
            FunctionId::Required => "required",
            FunctionId::Regex => "regex",
            FunctionId::Length => "length",
            FunctionId::Numeric => "numeric",
            FunctionId::Email => "email",
            FunctionId::FormatString => "formatString",
            FunctionId::FormatNumber => "formatNumber",
            FunctionId::FormatCurrency => "formatCurrency",
            FunctionId::FormatDate => "formatDate",
            FunctionId::Pluralize => "pluralize",
            FunctionId::And => "and",
            FunctionId::Or => "or",
            FunctionId::Not => "not",
            FunctionId::OpenUrl => "openUrl",
        }
    }

    /// Whether the function exists for its side effect rather than its value.
    pub const fn is_action(self) -> bool {
        matches!(self, FunctionId::OpenUrl)
    }
}

/// Resolve a function name to its canonical id.
///
/// Names are case-sensitive: `formatString` resolves, `formatstring` does not.
pub fn resolve_function(name: &str) -> Option<FunctionId> {
    FunctionId::ALL.into_iter().find(|id| id.name() == name)
}

/// Accepted built-in function names.
///
/// Used for diagnostics and typo suggestions.
pub fn builtin_function_names() -> &'static [&'static str] {
    BUILTIN_NAMES
}

/// Look up the display symbol for an ISO 4217 currency code.
///
/// Matching is case-insensitive. Returns `None` for codes outside the fixed
/// table; callers render those as `"<CODE> "`.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, symbol)| *symbol)
}

const BUILTIN_NAMES: &[&str] = &[
    "required",
    "regex",
    "length",
    "numeric",
    "email",
    "formatString",
    "formatNumber",
    "formatCurrency",
    "formatDate",
    "pluralize",
    "and",
    "or",
    "not",
    "openUrl",
];

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("KRW", "₩"),
    ("INR", "₹"),
    ("BRL", "R$"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
];
