//! Raw binary export of the sequence graph
//!
//! Layout, all nodes first and then all edges:
//! - node: `0x01`, id as `u32` little-endian, `\n`
//! - edge: `0x00`, source id `u32` LE, target id `u32` LE, `\n`

use crate::error::FetchError;
use crate::graph::SequenceGraph;
use crate::system::System;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Default export location, relative to the working directory
pub const RAWBIN_PATH: &str = "./output.bin";

const NODE_TAG: u8 = 1;
const EDGE_TAG: u8 = 0;
const RECORD_END: u8 = b'\n';

/// Encode the graph in the raw binary layout
#[must_use]
#[inline]
pub fn encode_rawbin(graph: &SequenceGraph) -> Vec<u8> {
    let mut buf = Vec::with_capacity(graph.node_count() * 6 + graph.edge_count() * 10);

    for node in graph.nodes() {
        buf.push(NODE_TAG);
        buf.extend_from_slice(&node.number().to_le_bytes());
        buf.push(RECORD_END);
    }

    for (from, to) in graph.edges() {
        buf.push(EDGE_TAG);
        buf.extend_from_slice(&from.number().to_le_bytes());
        buf.extend_from_slice(&to.number().to_le_bytes());
        buf.push(RECORD_END);
    }

    buf
}

/// Encode the graph and write it to `path`, replacing any previous export
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be written
#[inline]
pub fn write_rawbin(system: &dyn System, graph: &SequenceGraph, path: &Path) -> Result<()> {
    info!("Writing rawbin data to {}...", path.display());

    let bytes = encode_rawbin(graph);
    system.write(path, &bytes).map_err(|e| {
        return FetchError::filesystem(format!("Cannot write {}: {e}", path.display()));
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SequenceName;
    use crate::system::MockSystem;

    #[test]
    fn encodes_nodes_then_edges() {
        let mut graph = SequenceGraph::new();
        graph.add_edge(SequenceName::new(45), SequenceName::new(258));

        let bytes = encode_rawbin(&graph);

        assert_eq!(
            bytes,
            vec![
                1, 45, 0, 0, 0, b'\n', //
                1, 2, 1, 0, 0, b'\n', //
                0, 45, 0, 0, 0, 2, 1, 0, 0, b'\n',
            ]
        );
    }

    #[test]
    fn empty_graph_encodes_to_nothing() {
        assert!(encode_rawbin(&SequenceGraph::new()).is_empty());
    }

    #[test]
    fn write_replaces_previous_export() {
        let system = MockSystem::new()
            .with_file("/work/output.bin", &[9; 64])
            .unwrap();
        let mut graph = SequenceGraph::new();
        graph.node_or_insert(SequenceName::new(1));

        write_rawbin(&system, &graph, Path::new("/work/output.bin")).unwrap();

        assert_eq!(
            system.file_bytes(Path::new("/work/output.bin")),
            Some(vec![1, 1, 0, 0, 0, b'\n'])
        );
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let system = MockSystem::new();
        let err = write_rawbin(&system, &SequenceGraph::new(), Path::new("/nope/output.bin"))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<FetchError>().map(FetchError::exit_code),
            Some(3)
        );
    }
}
