//! Implementation of the `dynval render` command.

use std::path::PathBuf;

use dynval::interpreter::DEFAULT_MAX_DEPTH;
use dynval::Engine;
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};

use super::{cli_evaluator, load_document};

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Surface document to render (.json)
    pub file: PathBuf,

    /// Maximum component nesting depth
    #[arg(long, env = "DYNVAL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let surface = load_document(&args.file)?;
    let engine = Engine::builder()
        .max_depth(args.max_depth)
        .evaluator(cli_evaluator())
        .build();

    let rendered = engine.render(&surface);
    println!("{}", serde_json::to_string_pretty(&rendered).into_diagnostic()?);

    for warning in &rendered.warnings {
        eprintln!("{}: {}", "warning".if_supports_color(Stream::Stderr, |t| t.yellow()), warning);
    }
    Ok(exitcode::OK)
}
