//! Miette diagnostic wrapper for surface document parse errors.

use std::path::Path;

use dynval::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for surface parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(dynval::parse))]
pub struct SurfaceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl SurfaceDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    ///
    /// Errors found after the JSON was read (duplicate ids, bad children)
    /// carry no location and get no label.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let span = err
            .location()
            .map(|(line, column)| SourceSpan::from((byte_offset(content, line, column), 1)));

        SurfaceDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help: help_for(err).map(str::to_string),
        }
    }
}

/// Convert a 1-based line:column to a byte offset, clamped to the content.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len())
}

fn help_for(err: &ParseError) -> Option<&'static str> {
    match err {
        ParseError::Syntax { .. } | ParseError::UnexpectedEof { .. } => None,
        ParseError::Schema { .. } => {
            Some("a surface is {\"root\": id, \"components\": [...], \"data\": {...}}")
        }
        ParseError::DuplicateComponent { .. } => {
            Some("component ids must be unique within a surface")
        }
        ParseError::MissingRoot { .. } => {
            Some("declare a component with this id or change \"root\"")
        }
        ParseError::InvalidChildren { .. } => {
            Some("children is an id, a list of ids, or {\"componentId\": id, \"path\": pointer}")
        }
        ParseError::InvalidCheck { .. } => {
            Some("a check is {\"condition\": expr, \"message\": expr} or a call with a \"message\"")
        }
    }
}
