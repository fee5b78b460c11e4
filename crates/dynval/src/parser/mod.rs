//! Surface document, expression, and placeholder template parsers.
//!
//! This module turns JSON into the typed model the interpreter works on. Every
//! decision that depends only on the shape of the input (is this a reference,
//! a function call, a template descriptor?) is made here, once.

pub mod ast;
mod document;
pub mod error;
mod expression;
mod template;

pub use ast::{FormatSegment, FormatTemplate};
pub use document::{load_surface, parse_surface, parse_surface_value};
pub use error::{LoadError, ParseError};
pub use expression::{ARGS_KEY, CALL_KEY, parse_expression};
pub use template::parse_format_template;
