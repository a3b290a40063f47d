//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use revsim_core::catalog::{load_catalog, Corpus};
use revsim_core::config::EngineConfig;
use revsim_core::error::Result;
use revsim_core::Snapshot;
use tracing::debug;

use crate::cli::Cli;

/// Catalog file used when neither `--data` nor the config names one
pub const DEFAULT_DATA_FILE: &str = "review_data.csv";

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: EngineConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Result<Self> {
        let config = EngineConfig::discover(cli.config.as_deref())?;
        let ctx = Self { cli, config, start };
        ctx.trace_phase("load_config");
        Ok(ctx)
    }

    /// Log time since startup at the end of a phase when `--verbose` is set
    pub fn trace_phase(&self, phase: &'static str) {
        if self.cli.verbose {
            debug!(phase, elapsed = ?self.start.elapsed(), "phase finished");
        }
    }

    /// Catalog path: `--data`, then `[data].path`, then `review_data.csv`
    pub fn data_path(&self) -> PathBuf {
        self.cli
            .data
            .clone()
            .or_else(|| self.config.data_path())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub fn load_corpus(&self) -> Result<Corpus> {
        let path = self.data_path();
        debug!(path = %path.display(), "resolved catalog path");
        let corpus = load_catalog(&path, &self.config.data)?;
        self.trace_phase("load_catalog");
        Ok(corpus)
    }

    /// Load the catalog and build a snapshot from it
    pub fn build_snapshot(&self) -> Result<Snapshot> {
        let corpus = self.load_corpus()?;
        let snapshot = Snapshot::build(corpus, &self.config)?;
        self.trace_phase("build_snapshot");
        Ok(snapshot)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("revsim {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Recommends items whose reviews read alike.");
        println!();
        println!("Run `revsim --help` for usage information.");
        Ok(())
    }
}
