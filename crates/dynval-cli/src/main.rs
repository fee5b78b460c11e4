//! dynval CLI entry point.
//!
//! Provides command-line tools for working with surface documents:
//! - `dynval check` - Parse and lint documents
//! - `dynval eval` - Resolve a single expression
//! - `dynval render` - Print the resolved component tree
//! - `dynval validate` - Report validation results per component

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_eval, run_render, run_validate, CheckArgs, EvalArgs, RenderArgs, ValidateArgs,
};
use miette::MietteHandlerOpts;
use tracing_subscriber::EnvFilter;

/// Surface document tools.
#[derive(Debug, Parser)]
#[command(name = "dynval")]
#[command(about = "Resolve, validate and lint dynamic surface documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and lint surface documents
    Check(CheckArgs),
    /// Resolve one expression against a data tree
    Eval(EvalArgs),
    /// Print the resolved component tree as JSON
    Render(RenderArgs),
    /// Run every component's checks and report the results
    Validate(ValidateArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins unless `--verbose` is given.
fn setup_tracing(verbose: bool, color_when: ColorWhen) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Render(args) => run_render(args),
        Commands::Validate(args) => run_validate(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
