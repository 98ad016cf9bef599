//! Sequence cross-reference graph
//!
//! Every OEIS entry mentions other entries by A-number. Scanning the fetched
//! `seq` directory turns those mentions into a directed multigraph.

pub mod builder;
pub mod graphml;
pub mod rawbin;
pub mod sequence;

pub use builder::*;
pub use graphml::*;
pub use rawbin::*;
pub use sequence::*;

use bimap::BiMap;
use petgraph::graph::{Graph, NodeIndex};

/// Directed multigraph over sequence names
///
/// Backed by a `petgraph::Graph` plus a bidirectional name/index map, so a
/// node is found in O(1) without a dense adjacency matrix. Nodes keep
/// first-seen order. Edges keep insertion order and may repeat or loop back to
/// their source.
#[derive(Debug, Clone)]
pub struct SequenceGraph {
    graph: Graph<SequenceName, ()>,
    map: BiMap<SequenceName, NodeIndex>,
}

impl SequenceGraph {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    #[must_use]
    #[inline]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: Graph::with_capacity(nodes, edges),
            map: BiMap::with_capacity(nodes),
        }
    }

    /// Index of `name`, inserting it if unseen
    #[inline]
    pub fn node_or_insert(&mut self, name: SequenceName) -> NodeIndex {
        if let Some(&idx) = self.map.get_by_left(&name) {
            return idx;
        }
        let idx = self.graph.add_node(name);
        self.map.insert(name, idx);
        idx
    }

    /// Add a directed edge, inserting both endpoints as needed
    #[inline]
    pub fn add_edge(&mut self, from: SequenceName, to: SequenceName) {
        let from_idx = self.node_or_insert(from);
        let to_idx = self.node_or_insert(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Nodes in insertion order
    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = SequenceName> + '_ {
        self.graph.raw_nodes().iter().map(|node| node.weight)
    }

    /// Edges as `(from, to)` name pairs, in insertion order
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = (SequenceName, SequenceName)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
    }

    /// Name stored at a node index
    #[must_use]
    #[inline]
    pub fn name_of(&self, idx: NodeIndex) -> Option<SequenceName> {
        self.map.get_by_right(&idx).copied()
    }

    /// The underlying petgraph graph, for exporters
    #[must_use]
    #[inline]
    pub const fn as_graph(&self) -> &Graph<SequenceName, ()> {
        &self.graph
    }

    #[must_use]
    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for SequenceGraph {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
