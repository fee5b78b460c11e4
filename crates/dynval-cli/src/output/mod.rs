//! Terminal output helpers: diagnostics and tables.

mod diagnostic;
mod table;

pub use diagnostic::SurfaceDiagnostic;
pub use table::{format_validation_table, ValidationRow};
