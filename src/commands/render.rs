//! Rendering of command results in the three output formats

use revsim_core::error::Result;
use revsim_core::OutputFormat;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::helpers::{print_json, print_json_line};

/// A command result that can print itself in every output format
///
/// JSON comes from the `Serialize` impl; human and records output are
/// written by hand since they are meant for people and line-oriented tools.
pub trait Render: Serialize {
    fn human(&self, cli: &Cli);

    fn records(&self);
}

/// Print a result in the format selected on the command line
pub fn render<T: Render>(cli: &Cli, output: &T) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Human => {
            output.human(cli);
            Ok(())
        }
        OutputFormat::Records => {
            output.records();
            Ok(())
        }
    }
}

/// Like [`render`], but JSON is written on a single line for streaming
pub fn render_line<T: Render>(cli: &Cli, output: &T) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json_line(output),
        _ => render(cli, output),
    }
}
