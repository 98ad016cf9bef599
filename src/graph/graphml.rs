//! Brotli-compressed GraphML export of the sequence graph

use crate::error::FetchError;
use crate::graph::SequenceGraph;
use crate::system::System;
use anyhow::{Context as _, Result};
use brotli::CompressorWriter;
use petgraph_graphml::GraphMl;
use std::path::Path;
use tracing::info;

/// Default export location, relative to the working directory
pub const GRAPHMLZ_PATH: &str = "./output.graphmlz";

const BROTLI_BUFFER_SIZE: usize = 4096;
const BROTLI_QUALITY: u32 = 9;
const BROTLI_WINDOW_BITS: u32 = 22;

/// Render the graph as GraphML with node weights as labels, then compress it
///
/// # Errors
///
/// Returns an error if:
/// - The GraphML document cannot be written into the compressor
#[inline]
pub fn encode_graphmlz(graph: &SequenceGraph) -> Result<Vec<u8>> {
    let graph_ml = GraphMl::new(graph.as_graph()).export_node_weights_display();

    let mut compressor = CompressorWriter::new(
        Vec::new(),
        BROTLI_BUFFER_SIZE,
        BROTLI_QUALITY,
        BROTLI_WINDOW_BITS,
    );
    graph_ml
        .to_writer(&mut compressor)
        .context("Failed to write GraphML data")?;

    Ok(compressor.into_inner())
}

/// Encode the graph and write it to `path`, replacing any previous export
///
/// # Errors
///
/// Returns an error if:
/// - The GraphML document cannot be produced
/// - The file cannot be written
#[inline]
pub fn write_graphmlz(system: &dyn System, graph: &SequenceGraph, path: &Path) -> Result<()> {
    info!("Writing compressed GraphML data to {}...", path.display());

    let bytes = encode_graphmlz(graph)?;
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
    use std::io::Read as _;

    fn decompress(bytes: &[u8]) -> String {
        let mut xml = String::new();
        brotli::Decompressor::new(bytes, BROTLI_BUFFER_SIZE)
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn export_holds_every_node_and_edge() {
        let mut graph = SequenceGraph::new();
        graph.add_edge(SequenceName::new(45), SequenceName::new(32));
        graph.add_edge(SequenceName::new(45), SequenceName::new(32));
        graph.add_edge(SequenceName::new(32), SequenceName::new(32));
        graph.node_or_insert(SequenceName::new(7));

        let system = MockSystem::new().with_dir("/work").unwrap();
        write_graphmlz(&system, &graph, Path::new("/work/output.graphmlz")).unwrap();

        let bytes = system.file_bytes(Path::new("/work/output.graphmlz")).unwrap();
        let xml = decompress(&bytes);

        assert!(xml.contains("<graphml"));
        assert_eq!(xml.matches("<node ").count(), 3);
        assert_eq!(xml.matches("<edge ").count(), 3);
        assert!(xml.contains("A000045"));
        assert!(xml.contains("A000007"));
    }

    #[test]
    fn empty_graph_still_produces_a_document() {
        let xml = decompress(&encode_graphmlz(&SequenceGraph::new()).unwrap());

        assert!(xml.contains("<graphml"));
        assert_eq!(xml.matches("<node ").count(), 0);
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let system = MockSystem::new();
        let err = write_graphmlz(&system, &SequenceGraph::new(), Path::new("/nope/out.graphmlz"))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<FetchError>().map(FetchError::exit_code),
            Some(3)
        );
    }
}
