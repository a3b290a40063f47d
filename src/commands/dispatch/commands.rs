//! Command implementations for all revsim commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use revsim_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::cli::{DuplicatesArgs, RecommendArgs, ReplArgs, ScoreArgs};
    use crate::commands::{duplicates, products, recommend, repl, score, stats};
    use revsim_core::SnapshotHandle;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        let result = match cmd {
            Commands::Products => execute_products(ctx),
            Commands::Recommend(args) => execute_recommend(ctx, args),
            Commands::Score(args) => execute_score(ctx, args),
            Commands::Duplicates(args) => execute_duplicates(ctx, args),
            Commands::Stats => execute_stats(ctx),
            Commands::Repl(args) => execute_repl(ctx, args),
        };
        ctx.trace_phase("execute_command");
        result
    }

    fn execute_products(ctx: &CommandContext) -> Result<()> {
        let corpus = ctx.load_corpus()?;
        products::execute(ctx.cli, &corpus)
    }

    fn execute_recommend(ctx: &CommandContext, args: &RecommendArgs) -> Result<()> {
        let snapshot = ctx.build_snapshot()?;
        let k = args.k.unwrap_or(snapshot.top_k());
        recommend::execute(ctx.cli, &snapshot, &args.item, k)
    }

    fn execute_score(ctx: &CommandContext, args: &ScoreArgs) -> Result<()> {
        let snapshot = ctx.build_snapshot()?;
        score::execute(ctx.cli, &snapshot, &args.a, &args.b)
    }

    fn execute_duplicates(ctx: &CommandContext, args: &DuplicatesArgs) -> Result<()> {
        let snapshot = ctx.build_snapshot()?;
        let threshold = args
            .threshold
            .unwrap_or(ctx.config.engine.duplicate_threshold);
        duplicates::execute(ctx.cli, &snapshot, threshold)
    }

    fn execute_stats(ctx: &CommandContext) -> Result<()> {
        let snapshot = ctx.build_snapshot()?;
        stats::execute(ctx.cli, &snapshot, &ctx.data_path())
    }

    fn execute_repl(ctx: &CommandContext, args: &ReplArgs) -> Result<()> {
        let handle = SnapshotHandle::new(ctx.build_snapshot()?, ctx.config.clone());
        let k = args.k.unwrap_or(ctx.config.engine.top_k);
        let stdin = std::io::stdin();
        repl::execute(ctx.cli, &handle, stdin.lock(), k, || ctx.load_corpus())
    }
}
