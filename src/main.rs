//! Revsim - review-based item recommendations
//!
//! Loads a review catalog, builds a TF-IDF similarity snapshot and answers
//! "what is similar to this item" queries from the command line.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use revsim_core::error::RevsimError;
use revsim_core::logging;
use revsim_core::OutputFormat;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parsed arguments");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, cli.format, cli.quiet);
            exit_code(&e)
        }
    }
}

/// Handle an argument error before `Cli` exists
///
/// Scripts that asked for `--format json` get the usual error envelope on
/// stderr with the usage exit code; everyone else gets clap's own message.
fn parse_failure(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        || !argv_requests_json()
    {
        err.exit();
    }

    let error = RevsimError::UsageError(err.to_string());
    report(&error, OutputFormat::Json, false);
    exit_code(&error)
}

fn report(error: &RevsimError, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        _ if quiet => {}
        _ => eprintln!("error: {}", error),
    }
}

fn exit_code(error: &RevsimError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}

/// Whether `--format json` appears on the raw command line
fn argv_requests_json() -> bool {
    let args: Vec<String> = env::args().skip(1).collect();
    args.iter().any(|a| a == "--format=json")
        || args
            .windows(2)
            .any(|pair| pair[0] == "--format" && pair[1] == "json")
}
