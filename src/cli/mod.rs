//! CLI argument parsing for revsim
//!
//! Global flags: --data, --config, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{DuplicatesArgs, RecommendArgs, ReplArgs, ScoreArgs};
use parse::parse_output_format;
pub use revsim_core::OutputFormat;

/// Revsim - recommend items whose reviews read alike
#[derive(Parser, Debug)]
#[command(name = "revsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Review catalog (CSV, JSON or JSON lines)
    #[arg(long, global = true, env = "REVSIM_DATA")]
    pub data: Option<PathBuf>,

    /// Config file (default: $REVSIM_CONFIG_DIR or ~/.config/revsim/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List distinct items in catalog order
    Products,

    /// Show the items most similar to ITEM
    Recommend(RecommendArgs),

    /// Show the similarity between two items
    Score(ScoreArgs),

    /// List pairs of items with near-identical reviews
    Duplicates(DuplicatesArgs),

    /// Summarize the catalog, vocabulary and snapshot
    Stats,

    /// Read item ids from stdin and answer each one
    Repl(ReplArgs),
}
