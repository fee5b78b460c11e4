//! Parse and load error types for dynval documents.

use std::io;
use std::path::PathBuf;

use serde_json::error::Category;
use thiserror::Error;

/// An error that occurred while parsing a surface document.
///
/// These are the only errors agent-authored content can produce. Once a
/// document parses, resolving it never fails.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },

    /// Well-formed JSON that does not have the shape of a surface document.
    #[error("invalid document at {line}:{column}: {message}")]
    Schema {
        line: usize,
        column: usize,
        message: String,
    },

    /// Two components share an id.
    #[error("duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    /// The root id names no declared component.
    #[error("root component '{root}' is not declared")]
    MissingRoot { root: String },

    /// A children expression has an unsupported shape.
    #[error("component '{component}' has invalid children: {message}")]
    InvalidChildren { component: String, message: String },

    /// A check is neither `{condition, message}` nor a function call.
    #[error("component '{component}' has invalid check #{index}: {message}")]
    InvalidCheck {
        component: String,
        index: usize,
        message: String,
    },
}

impl ParseError {
    /// Line and column of the error, when it stems from the JSON text.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column, .. }
            | ParseError::UnexpectedEof { line, column }
            | ParseError::Schema { line, column, .. } => Some((*line, *column)),
            ParseError::DuplicateComponent { .. }
            | ParseError::MissingRoot { .. }
            | ParseError::InvalidChildren { .. }
            | ParseError::InvalidCheck { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        let (line, column) = (e.line(), e.column());
        match e.classify() {
            Category::Eof => ParseError::UnexpectedEof { line, column },
            Category::Data => ParseError::Schema {
                line,
                column,
                message: e.to_string(),
            },
            Category::Syntax | Category::Io => ParseError::Syntax {
                line,
                column,
                message: e.to_string(),
            },
        }
    }
}

/// Errors that occur while loading a surface document from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the document.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parse error with file context.
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
