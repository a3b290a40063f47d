//! `revsim score` command - similarity between two items

use revsim_core::error::{Result, RevsimError};
use revsim_core::format::format_score;
use revsim_core::records;
use revsim_core::Snapshot;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::render::{render, Render};

#[derive(Debug, Serialize)]
struct ScoreOutput<'a> {
    a: &'a str,
    b: &'a str,
    score: f64,
}

impl Render for ScoreOutput<'_> {
    fn human(&self, cli: &Cli) {
        if cli.quiet {
            println!("{}", format_score(self.score));
        } else {
            println!("\"{}\" ~ \"{}\": {}", self.a, self.b, format_score(self.score));
        }
    }

    fn records(&self) {
        println!("{}", records::header("score", &[]));
        println!("{}", records::score_line(self.score, self.a, self.b));
    }
}

/// Execute the score command
pub fn execute(cli: &Cli, snapshot: &Snapshot, a: &str, b: &str) -> Result<()> {
    // Report the first unknown id, not just "one of them"
    for item in [a, b] {
        if !snapshot.index().contains(item) {
            return Err(RevsimError::item_not_found(item));
        }
    }

    let score = snapshot
        .score(a, b)
        .ok_or_else(|| RevsimError::item_not_found(a))?;

    render(cli, &ScoreOutput { a, b, score })
}
