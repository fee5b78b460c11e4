//! Implementation of the `dynval eval` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use dynval::{parse_expression, Resolver};
use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use serde_json::{Map, Value};

use super::cli_evaluator;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Expression to resolve, as JSON (e.g. '"/user/name"' or '{"call": "not", ...}')
    #[arg(long, required = true)]
    pub expr: String,

    /// JSON file holding the root data tree
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Scoped data as inline JSON, consulted before the root data
    #[arg(long)]
    pub scoped: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results. An unresolved expression is `null`.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: Option<Value>,
}

fn parse_json(label: &str, text: &str) -> miette::Result<Value> {
    serde_json::from_str(text).map_err(|e| miette!("Invalid JSON in {}: {}", label, e))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let expr = parse_expression(&parse_json("--expr", &args.expr)?);

    let data = match &args.data {
        Some(path) => {
            let content = read_to_string(path)
                .into_diagnostic()
                .map_err(|e| miette!("Cannot read data file {}: {}", path.display(), e))?;
            parse_json(&path.display().to_string(), &content)?
        }
        None => Value::Object(Map::new()),
    };
    let scoped = args
        .scoped
        .as_deref()
        .map(|text| parse_json("--scoped", text))
        .transpose()?;

    let evaluator = cli_evaluator();
    let resolver = Resolver::new(&data, &evaluator);
    let result = match &scoped {
        Some(scoped) => resolver.with_scoped_data(scoped).resolve(&expr),
        None => resolver.resolve(&expr),
    };

    if args.json {
        let output = serde_json::to_string_pretty(&EvalResult { result }).into_diagnostic()?;
        println!("{}", output);
        return Ok(exitcode::OK);
    }

    match result {
        Some(Value::String(text)) => println!("{}", text),
        Some(value) => println!("{}", value),
        None => eprintln!("(unresolved)"),
    }
    Ok(exitcode::OK)
}
