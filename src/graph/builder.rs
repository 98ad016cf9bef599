//! Build the cross-reference graph from a directory of sequence files

use crate::error::FetchError;
use crate::graph::{SequenceGraph, SequenceName};
use crate::system::System;
use anyhow::{Context as _, Result};
use indicatif::ProgressBar;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};

/// A-number mentions inside an entry
pub const SEQUENCE_REFERENCE_PATTERN: &str = r"A\d{6,}";

// Sized for the full OEIS dump.
const EXPECTED_NODES: usize = 400_000;
const EXPECTED_EDGES: usize = 100_000;

/// Scan every file under `seq_dir` and link it to each sequence it mentions
///
/// A file becomes a node when its stem is a sequence name, even if it mentions
/// nothing; other files are skipped. The upstream graph export only gained
/// nodes through edges, so an entry without mentions was absent there but is
/// present here. A mention that does not fit a `u32` is skipped with a warning.
///
/// # Errors
///
/// Returns an error if:
/// - `seq_dir` is missing or cannot be walked
/// - A sequence file cannot be read
#[inline]
pub fn build_graph(system: &dyn System, seq_dir: &Path) -> Result<SequenceGraph> {
    if !system.is_dir(seq_dir) {
        return Err(FetchError::graph(format!(
            "Sequence directory not found: {}",
            seq_dir.display()
        ))
        .into());
    }

    let pattern = Regex::new(SEQUENCE_REFERENCE_PATTERN)
        .context("Failed to compile sequence reference pattern")?;
    let entries = system.walk_dir(seq_dir).map_err(|e| {
        return FetchError::graph(format!("Cannot walk {}: {e}", seq_dir.display()));
    })?;

    let mut graph = SequenceGraph::with_capacity(EXPECTED_NODES, EXPECTED_EDGES);
    let progress = ProgressBar::new_spinner();
    let mut count: u64 = 0;

    for entry in entries.iter().filter(|entry| entry.is_file) {
        let Some(name) = file_sequence_name(&entry.path) else {
            debug!("Skipping non-sequence file {}", entry.path.display());
            continue;
        };
        graph.node_or_insert(name);

        let contents = system
            .read_to_string(&entry.path)
            .with_context(|| format!("Failed to read sequence file: {}", entry.path.display()))?;

        for mention in pattern.find_iter(&contents) {
            match mention.as_str().parse::<SequenceName>() {
                Ok(target) => graph.add_edge(name, target),
                Err(e) => warn!("{} in {}", e, entry.path.display()),
            }
        }

        tick(&progress, &mut count);
    }

    progress.finish_with_message("Done building graph!");
    info!(
        "Parsed {} sequences: {} nodes, {} edges",
        count,
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Advance the spinner, reporting the count of files parsed before this one
fn tick(progress: &ProgressBar, count: &mut u64) {
    progress.inc(1);
    progress.set_message(format!("Parsing {count} sequences..."));
    *count += 1;
}

fn file_sequence_name(path: &Path) -> Option<SequenceName> {
    path.file_stem()?.to_str()?.parse().ok()
}
