//! `revsim repl` command - answer item ids read from stdin
//!
//! Each non-empty line is an item id. Every query is answered against the
//! snapshot current at that moment; `:reload` re-reads the catalog and
//! publishes a new snapshot only if it changed. `:quit` or end of input
//! stops the loop. Unknown ids print a notice and the loop continues; bytes
//! that are not UTF-8 are replaced rather than ending the session.

use std::borrow::Cow;
use std::io::BufRead;

use revsim_core::catalog::Corpus;
use revsim_core::error::{Result, RevsimError};
use revsim_core::records;
use revsim_core::{OutputFormat, SnapshotHandle};
use serde_json::json;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::commands::helpers::{print_json_line, quoted};
use crate::commands::recommend::RecommendOutput;
use crate::commands::render::render_line;

const RELOAD: &str = ":reload";
const QUIT: &[&str] = &[":quit", ":q", ":exit"];

/// Execute the repl command
pub fn execute<R, F>(
    cli: &Cli,
    handle: &SnapshotHandle,
    mut input: R,
    k: usize,
    reload: F,
) -> Result<()>
where
    R: BufRead,
    F: Fn() -> Result<Corpus>,
{
    let mut answered = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // A line that is not UTF-8 is still a query; it just won't match
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("repl input line is not valid UTF-8");
        }
        let item = line.trim();

        if item.is_empty() {
            continue;
        }
        if QUIT.contains(&item) {
            break;
        }
        if item == RELOAD {
            handle_reload(cli, handle, &reload);
            continue;
        }

        let snapshot = handle.current();
        match snapshot.recommend(item, k) {
            Some(recs) => {
                if cli.format == OutputFormat::Human && answered > 0 {
                    println!();
                }
                render_line(cli, &RecommendOutput::new(item, k, &recs))?;
            }
            None => report_not_found(cli, item)?,
        }
        answered += 1;
    }

    debug!(answered, "repl finished");
    Ok(())
}

fn handle_reload<F>(cli: &Cli, handle: &SnapshotHandle, reload: &F)
where
    F: Fn() -> Result<Corpus>,
{
    match reload().and_then(|corpus| handle.refresh(corpus)) {
        Ok(true) => {
            if !cli.quiet {
                eprintln!("catalog changed; snapshot rebuilt");
            }
        }
        Ok(false) => {
            if !cli.quiet {
                eprintln!("catalog unchanged");
            }
        }
        Err(e) => {
            // Keep serving the previous snapshot
            warn!(error = %e, "reload failed");
            if !cli.quiet {
                eprintln!("warning: reload failed: {}", e);
            }
        }
    }
}

fn report_not_found(cli: &Cli, item: &str) -> Result<()> {
    let err = RevsimError::item_not_found(item);
    match cli.format {
        OutputFormat::Json => print_json_line(&json!({
            "item": item,
            "error": err.to_json()["error"],
        })),
        OutputFormat::Human => {
            if !cli.quiet {
                eprintln!("not found: {}", item);
            }
            Ok(())
        }
        OutputFormat::Records => {
            println!(
                "{}",
                records::header("recommend", &[("item", quoted(item)), ("found", "0".to_string())])
            );
            Ok(())
        }
    }
}
