//! identity-entry: issue signed identity entry URLs from the command line.
//!
//! Entry point for the application. Parses CLI arguments, sets up logging,
//! and delegates to the appropriate command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod display;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout carries only command output.
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug for
/// this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "identity_entry=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch to the appropriate command handler.
///
/// Returns instead of calling `process::exit` so all destructors
/// (including `Zeroizing`) run.
fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Url(args) => commands::url::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    }
}
