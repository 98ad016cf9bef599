//! `seqfetch` - Sparse-fetch the OEIS sequence dataset
//!
//! This library clones only the `seq` directory of the OEIS data repository,
//! skipping the fetch entirely when the target directory already exists, and
//! can turn the fetched entries into a cross-reference graph.

pub mod cli;
pub mod error;
pub mod git;
pub mod graph;
pub mod operations;
pub mod system;

use anyhow::Result;
use cli::Args;
use git::{DatasetSource, GitRunner, RealGitRunner, SparseClone};
use graph::{GRAPHMLZ_PATH, RAWBIN_PATH, build_graph, write_graphmlz, write_rawbin};
use operations::{Fetcher, OutputFormat, render_plan};
use std::path::Path;
use system::{RealSystem, System};
use tracing::info;

/// Main entry point for the seqfetch library
pub fn run(args: &Args) -> Result<()> {
    let system = RealSystem::new();
    let runner = RealGitRunner::new();
    run_with(args, &system, &runner)
}

/// Run against explicit system and git implementations
pub fn run_with(args: &Args, system: &dyn System, runner: &dyn GitRunner) -> Result<()> {
    let clone = SparseClone::new(DatasetSource::oeis());

    let fetcher = Fetcher::new(clone, system, runner);

    if args.dry_run {
        let format = args.output_format.parse::<OutputFormat>()?;
        return preview(&fetcher, format);
    }

    fetcher.ensure()?;

    if args.graph {
        let seq_dir = fetcher.sparse_clone().source.checkout_dir();
        let graph = build_graph(system, &seq_dir)?;
        write_rawbin(system, &graph, Path::new(RAWBIN_PATH))?;
        write_graphmlz(system, &graph, Path::new(GRAPHMLZ_PATH))?;
        info!("\u{2713} Wrote sequence graph to {RAWBIN_PATH} and {GRAPHMLZ_PATH}");
    }

    Ok(())
}

/// Print the plan, or nothing when the fetch would be skipped
fn preview(fetcher: &Fetcher<'_>, format: OutputFormat) -> Result<()> {
    let clone = fetcher.sparse_clone();
    let target = clone.source.target();
    if fetcher.target_present()? {
        info!(
            "Dry run: {} already present, no git commands would run",
            target.display()
        );
        return Ok(());
    }

    let rendered = render_plan(&clone.invocations(), format)?;

    // Output to stdout (not using logging)
    println!("{rendered}");

    Ok(())
}
