//! `revsim recommend` command - top-K similar items for one item

use revsim_core::error::{Result, RevsimError};
use revsim_core::format::format_score;
use revsim_core::records;
use revsim_core::{Recommendation, Snapshot};
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::helpers::{column_width, quoted};
use crate::commands::render::{render, Render};

/// JSON shape of one recommendation
#[derive(Debug, Serialize)]
pub struct RankedItem<'a> {
    pub rank: usize,
    pub item_id: &'a str,
    pub position: usize,
    pub score: f64,
}

/// JSON shape of a recommend result
#[derive(Debug, Serialize)]
pub struct RecommendOutput<'a> {
    pub item: &'a str,
    pub k: usize,
    pub count: usize,
    pub recommendations: Vec<RankedItem<'a>>,
}

impl<'a> RecommendOutput<'a> {
    pub fn new(item: &'a str, k: usize, recs: &'a [Recommendation]) -> Self {
        RecommendOutput {
            item,
            k,
            count: recs.len(),
            recommendations: recs
                .iter()
                .enumerate()
                .map(|(i, r)| RankedItem {
                    rank: i + 1,
                    item_id: &r.item_id,
                    position: r.position,
                    score: r.score,
                })
                .collect(),
        }
    }
}

impl Render for RecommendOutput<'_> {
    fn human(&self, cli: &Cli) {
        if self.recommendations.is_empty() {
            if !cli.quiet {
                println!("No recommendations for \"{}\"", self.item);
            }
            return;
        }

        if !cli.quiet {
            println!("Top {} similar to \"{}\":", self.count, self.item);
        }

        let width = column_width(self.recommendations.iter().map(|r| r.item_id));
        for rec in &self.recommendations {
            println!(
                "{:>3}. {:<width$}  {}",
                rec.rank,
                rec.item_id,
                format_score(rec.score),
                width = width
            );
        }
    }

    fn records(&self) {
        println!(
            "{}",
            records::header(
                "recommend",
                &[
                    ("item", quoted(self.item)),
                    ("k", self.k.to_string()),
                    ("results", self.count.to_string()),
                ],
            )
        );
        for rec in &self.recommendations {
            println!(
                "{}",
                records::recommendation_line(rec.rank, rec.position, rec.score, rec.item_id)
            );
        }
    }
}

/// Execute the recommend command
pub fn execute(cli: &Cli, snapshot: &Snapshot, item: &str, k: usize) -> Result<()> {
    let recs = snapshot
        .recommend(item, k)
        .ok_or_else(|| RevsimError::item_not_found(item))?;

    if recs.is_empty() && snapshot.is_degraded() && !cli.quiet {
        eprintln!("warning: catalog has no usable review terms; no recommendations available");
    }

    render(cli, &RecommendOutput::new(item, k, &recs))
}
