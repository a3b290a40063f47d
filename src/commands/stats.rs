//! `revsim stats` command - catalog, vocabulary and snapshot summary

use std::path::Path;

use revsim_core::error::Result;
use revsim_core::records;
use revsim_core::{Snapshot, SnapshotStats};
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::helpers::quoted;
use crate::commands::render::{render, Render};

#[derive(Debug, Serialize)]
struct StatsOutput<'a> {
    data: String,
    #[serde(flatten)]
    stats: &'a SnapshotStats,
}

impl Render for StatsOutput<'_> {
    fn human(&self, _cli: &Cli) {
        let stats = self.stats;
        println!("Catalog:          {}", self.data);
        println!("Documents:        {}", stats.documents);
        println!("Distinct items:   {}", stats.distinct_items);
        println!("Duplicate ids:    {}", stats.duplicate_ids);
        println!("Empty documents:  {}", stats.empty_documents);
        println!("Vocabulary terms: {}", stats.vocabulary_terms);
        println!(
            "Non-zero weights: {} ({:.2}% dense)",
            stats.nonzero_weights,
            stats.density * 100.0
        );
        println!("Self exclusion:   {}", stats.self_exclusion);
        println!("Built at:         {}", stats.built_at.to_rfc3339());
        println!("Fingerprint:      {}", stats.fingerprint);
        if stats.degraded {
            println!("Status:           degraded (no usable review terms)");
        }
    }

    fn records(&self) {
        let stats = self.stats;
        println!(
            "{}",
            records::header(
                "stats",
                &[
                    ("data", quoted(&self.data)),
                    ("documents", stats.documents.to_string()),
                    ("items", stats.distinct_items.to_string()),
                    ("duplicate_ids", stats.duplicate_ids.to_string()),
                    ("empty_documents", stats.empty_documents.to_string()),
                    ("terms", stats.vocabulary_terms.to_string()),
                    ("nnz", stats.nonzero_weights.to_string()),
                    ("degraded", stats.degraded.to_string()),
                    ("fingerprint", stats.fingerprint.clone()),
                ],
            )
        );
    }
}

/// Execute the stats command
pub fn execute(cli: &Cli, snapshot: &Snapshot, data_path: &Path) -> Result<()> {
    let stats = snapshot.stats();
    render(
        cli,
        &StatsOutput {
            data: data_path.display().to_string(),
            stats: &stats,
        },
    )
}
