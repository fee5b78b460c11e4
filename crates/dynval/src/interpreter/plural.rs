//! Plural category selection for `pluralize`.
//!
//! Categories come from fixed numeric bands rather than per-language CLDR
//! rules, so the same count selects the same category in every locale:
//!
//! | count | category |
//! |-------|----------|
//! | 0 | `zero` |
//! | 1 | `one` |
//! | 2 | `two` |
//! | 3..=10 | `few` |
//! | 11..=99 | `many` |
//! | anything else | `other` |

/// Every category name, in band order.
pub const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Get the plural category for a count.
///
/// Fractional, negative, and non-finite counts are `other`.
///
/// # Examples
///
/// ```
/// use dynval::interpreter::plural_category;
///
/// assert_eq!(plural_category(0.0), "zero");
/// assert_eq!(plural_category(1.0), "one");
/// assert_eq!(plural_category(7.0), "few");
/// assert_eq!(plural_category(42.0), "many");
/// assert_eq!(plural_category(100.0), "other");
/// assert_eq!(plural_category(1.5), "other");
/// ```
pub fn plural_category(count: f64) -> &'static str {
    if !count.is_finite() || count.fract() != 0.0 {
        return "other";
    }
    if count < 0.0 || count >= 100.0 {
        return "other";
    }
    match count as i64 {
        0 => "zero",
        1 => "one",
        2 => "two",
        3..=10 => "few",
        11..=99 => "many",
        _ => "other",
    }
}
