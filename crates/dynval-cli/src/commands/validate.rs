//! Implementation of the `dynval validate` command.

use std::path::PathBuf;

use dynval::interpreter::DEFAULT_MAX_DEPTH;
use dynval::Engine;
use miette::IntoDiagnostic;
use serde::Serialize;
use serde_json::Value;

use crate::output::{format_validation_table, ValidationRow};

use super::{cli_evaluator, load_document};

/// Arguments for the validate command.
#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Surface document to validate (.json)
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum component nesting depth
    #[arg(long, env = "DYNVAL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// JSON output for one validated component instance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationJson<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scoped_data: Option<&'a Value>,
    is_valid: bool,
    errors: &'a [String],
}

/// Run the validate command.
pub fn run_validate(args: ValidateArgs) -> miette::Result<i32> {
    let surface = load_document(&args.file)?;
    let engine = Engine::builder()
        .max_depth(args.max_depth)
        .evaluator(cli_evaluator())
        .build();
    let rendered = engine.render(&surface);

    let results: Vec<ValidationJson<'_>> = rendered
        .nodes()
        .into_iter()
        .filter_map(|node| {
            node.validation.as_ref().map(|validation| ValidationJson {
                id: &node.id,
                scoped_data: node.scoped_data.as_ref(),
                is_valid: validation.is_valid,
                errors: &validation.errors,
            })
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    } else if results.is_empty() {
        println!("No components with checks.");
    } else {
        let rows: Vec<ValidationRow> = results
            .iter()
            .map(|result| ValidationRow {
                id: result.id.to_string(),
                scope: result.scoped_data.map(ToString::to_string),
                valid: result.is_valid,
                errors: result.errors.to_vec(),
            })
            .collect();
        println!("{}", format_validation_table(&rows));
    }

    if results.iter().all(|result| result.is_valid) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
