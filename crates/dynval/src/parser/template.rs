//! Placeholder template parser using winnow.
//!
//! Parses `formatString` templates into literal text and `${expr}`
//! placeholders. Handles:
//! - Literal text segments
//! - `${name}` placeholders naming a call argument
//! - `${/path}` placeholders naming a data path
//! - A `$` that does not open a placeholder, or a `${` that is never closed,
//!   stays literal text

use super::ast::{FormatSegment, FormatTemplate};
use super::error::ParseError;
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_till;

/// Parse a template string into an AST.
///
/// # Example
///
/// ```
/// use dynval::parser::{FormatSegment, parse_format_template};
///
/// let template = parse_format_template("Hi ${name}, you have ${/count}").unwrap();
/// assert_eq!(
///     template.segments,
///     vec![
///         FormatSegment::Literal("Hi ".to_string()),
///         FormatSegment::Placeholder("name".to_string()),
///         FormatSegment::Literal(", you have ".to_string()),
///         FormatSegment::Placeholder("/count".to_string()),
///     ]
/// );
/// ```
pub fn parse_format_template(input: &str) -> Result<FormatTemplate, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => Ok(t),
        Ok(_) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!(
                    "unexpected character: '{}'",
                    remaining.chars().next().unwrap_or('?')
                ),
            })
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<FormatTemplate> {
    let segments: Vec<FormatSegment> = repeat(0.., segment).parse_next(input)?;
    Ok(FormatTemplate {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<FormatSegment>) -> Vec<FormatSegment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            FormatSegment::Literal(text) => {
                if let Some(FormatSegment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(FormatSegment::Literal(text));
                }
            }
            other @ FormatSegment::Placeholder(_) => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder, literal run, or stray `$`).
fn segment(input: &mut &str) -> ModalResult<FormatSegment> {
    alt((placeholder, literal_run, dollar)).parse_next(input)
}

/// Parse a placeholder: `${ expr }`
fn placeholder(input: &mut &str) -> ModalResult<FormatSegment> {
    delimited("${", take_till(0.., '}'), '}')
        .map(|expr: &str| FormatSegment::Placeholder(expr.trim().to_string()))
        .parse_next(input)
}

/// Parse a run of text up to the next `$`.
fn literal_run(input: &mut &str) -> ModalResult<FormatSegment> {
    take_till(1.., '$')
        .map(|text: &str| FormatSegment::Literal(text.to_string()))
        .parse_next(input)
}

/// Parse a `$` that does not start a closed placeholder.
fn dollar(input: &mut &str) -> ModalResult<FormatSegment> {
    "$".value(FormatSegment::Literal("$".to_string()))
        .parse_next(input)
}
