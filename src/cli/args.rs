//! Command argument structures

use clap::Args;

use crate::cli::parse::{parse_k, parse_threshold};

/// Arguments for the recommend command.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Item id exactly as it appears in the catalog
    pub item: String,

    /// Number of recommendations (default from config, 5)
    #[arg(short, long, value_parser = parse_k)]
    pub k: Option<usize>,
}

/// Arguments for the score command.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// First item id
    pub a: String,

    /// Second item id
    pub b: String,
}

/// Arguments for the duplicates command.
#[derive(Args, Debug)]
pub struct DuplicatesArgs {
    /// Minimum similarity for a pair (default from config, 0.85)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,
}

/// Arguments for the repl command.
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Number of recommendations per query (default from config, 5)
    #[arg(short, long, value_parser = parse_k)]
    pub k: Option<usize>,
}
