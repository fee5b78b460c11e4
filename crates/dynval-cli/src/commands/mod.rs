//! CLI command implementations.

mod check;
mod eval;
mod render;
mod validate;

use std::fs::read_to_string;
use std::path::Path;

use dynval::{parse_surface, FunctionEvaluator, Surface};
use miette::{miette, IntoDiagnostic};

use crate::output::SurfaceDiagnostic;

pub use check::{run_check, CheckArgs};
pub use eval::{run_eval, EvalArgs};
pub use render::{run_render, RenderArgs};
pub use validate::{run_validate, ValidateArgs};

/// Evaluator used by every command. `openUrl` is logged, never followed.
fn cli_evaluator() -> FunctionEvaluator {
    FunctionEvaluator::with_open_url(|url| {
        tracing::info!(url, "openUrl requested; not opening from the command line");
    })
}

/// Read and parse a surface document, turning parse failures into a
/// diagnostic pointing into the file.
fn load_document(path: &Path) -> miette::Result<Surface> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;

    parse_surface(&content)
        .map_err(|e| SurfaceDiagnostic::from_parse_error(path, &content, &e).into())
}
