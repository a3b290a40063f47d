//! `revsim duplicates` command - near-identical review pairs

use revsim_core::error::Result;
use revsim_core::format::format_score;
use revsim_core::records;
use revsim_core::Snapshot;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::helpers::column_width;
use crate::commands::render::{render, Render};

#[derive(Debug, Serialize)]
struct DuplicateEntry<'a> {
    first: &'a str,
    first_position: usize,
    second: &'a str,
    second_position: usize,
    score: f64,
}

#[derive(Debug, Serialize)]
struct DuplicatesOutput<'a> {
    threshold: f64,
    count: usize,
    pairs: Vec<DuplicateEntry<'a>>,
}

impl Render for DuplicatesOutput<'_> {
    fn human(&self, cli: &Cli) {
        if self.pairs.is_empty() {
            if !cli.quiet {
                println!("No near-duplicates at threshold {}", format_score(self.threshold));
            }
            return;
        }

        let width = column_width(self.pairs.iter().map(|p| p.first));
        for pair in &self.pairs {
            println!(
                "{}  {:<width$}  <->  {}",
                format_score(pair.score),
                pair.first,
                pair.second,
                width = width
            );
        }
    }

    fn records(&self) {
        println!(
            "{}",
            records::header(
                "duplicates",
                &[
                    ("threshold", format_score(self.threshold)),
                    ("pairs", self.count.to_string()),
                ],
            )
        );
        for pair in &self.pairs {
            println!("{}", records::duplicate_line(pair.score, pair.first, pair.second));
        }
    }
}

/// Execute the duplicates command
pub fn execute(cli: &Cli, snapshot: &Snapshot, threshold: f64) -> Result<()> {
    let corpus = snapshot.corpus();
    let pairs: Vec<DuplicateEntry> = snapshot
        .find_duplicates(threshold)
        .into_iter()
        .filter_map(|pair| {
            Some(DuplicateEntry {
                first: corpus.item_id(pair.first)?,
                first_position: pair.first,
                second: corpus.item_id(pair.second)?,
                second_position: pair.second,
                score: pair.score,
            })
        })
        .collect();

    render(
        cli,
        &DuplicatesOutput {
            threshold,
            count: pairs.len(),
            pairs,
        },
    )
}
