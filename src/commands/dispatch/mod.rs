//! Command dispatch for revsim
//!
//! Config is discovered once per run; each command then loads the catalog
//! and builds whatever it needs from the shared context.

use std::time::Instant;

use revsim_core::error::Result;

use crate::cli::Cli;

mod command;
mod commands;

use command::{Command, CommandContext, NoCommand};

/// Run the selected subcommand, or print the banner when there is none
pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::new(cli, start)?;
    match &cli.command {
        Some(cmd) => cmd.execute(&ctx),
        None => NoCommand.execute(&ctx),
    }
}
