//! Implementation of the `dynval check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use dynval::{lint_surface, parse_surface};
use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::SurfaceDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Surface documents to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<String>,
}

impl FileReport {
    fn is_clean(&self) -> bool {
        self.error.is_none() && self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let file = path.display().to_string();
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if !args.json {
                    eprintln!(
                        "{}: cannot read file: {}",
                        file.if_supports_color(Stream::Stderr, |t| t.red()),
                        e
                    );
                }
                reports.push(FileReport {
                    file,
                    error: Some(e.to_string()),
                    warnings: Vec::new(),
                });
                continue;
            }
        };

        let report = match parse_surface(&content) {
            Ok(surface) => FileReport {
                file,
                error: None,
                warnings: lint_surface(&surface)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            Err(e) => {
                if !args.json {
                    let diagnostic = SurfaceDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                FileReport {
                    file,
                    error: Some(e.to_string()),
                    warnings: Vec::new(),
                }
            }
        };

        if !args.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if args.json {
        let output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{}", output);
    }

    if reports.iter().all(FileReport::is_clean) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

fn print_report(report: &FileReport) {
    if report.is_clean() {
        println!("{} {}", "ok".if_supports_color(Stream::Stdout, |t| t.green()), report.file);
        return;
    }
    for warning in &report.warnings {
        println!(
            "{} {}: {}",
            "warning".if_supports_color(Stream::Stdout, |t| t.yellow()),
            report.file,
            warning
        );
    }
}
