//! Signal-flow graph model: a directed multigraph whose edges carry parsed
//! gain expressions.
//!
//! Parallel edges between the same node pair are first-class, so every edge
//! is addressed by its [`EdgeIndex`] rather than by its endpoints. Edge
//! indices equal input position: edges are inserted in input order and never
//! removed.

use ahash::AHashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::algebra::SymbolicAlgebra;
use crate::error::{Error, Result};

/// A node as it appears in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
}

/// An edge as it appears in a request. `label` is a gain expression such as
/// `"1/s"` or `"K*(s+1)"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Edge weight: the original label text plus its parsed gain.
#[derive(Debug, Clone)]
pub struct GainEdge<E> {
    pub label: String,
    pub gain: E,
}

/// An immutable signal-flow graph, built once per request.
#[derive(Debug)]
pub struct FlowGraph<E> {
    graph: DiGraph<String, GainEdge<E>>,
    indices: AHashMap<String, NodeIndex>,
    // petgraph iterates adjacency in reverse insertion order; outgoing edges
    // are kept here in input order so traversal order is deterministic.
    outgoing: AHashMap<NodeIndex, Vec<EdgeIndex>>,
}

impl<E> FlowGraph<E> {
    /// Builds a graph from request nodes and edges. Fails if an edge
    /// references a node id that is not in `nodes`, or if a gain label
    /// cannot be parsed.
    pub fn build<A>(algebra: &A, nodes: &[NodeSpec], edges: &[EdgeSpec]) -> Result<Self>
    where
        A: SymbolicAlgebra<Expr = E>,
    {
        let mut graph = DiGraph::new();
        let mut indices = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            indices
                .entry(node.id.clone())
                .or_insert_with(|| graph.add_node(node.id.clone()));
        }

        let mut outgoing: AHashMap<NodeIndex, Vec<EdgeIndex>> = AHashMap::new();
        for (position, edge) in edges.iter().enumerate() {
            let source = *indices.get(&edge.source).ok_or_else(|| Error::UnknownNode {
                edge: position,
                node: edge.source.clone(),
            })?;
            let target = *indices.get(&edge.target).ok_or_else(|| Error::UnknownNode {
                edge: position,
                node: edge.target.clone(),
            })?;
            let gain = algebra.parse(&edge.label).map_err(|e| Error::InvalidGain {
                edge: position,
                label: edge.label.clone(),
                reason: e.to_string(),
            })?;
            let index = graph.add_edge(
                source,
                target,
                GainEdge {
                    label: edge.label.clone(),
                    gain,
                },
            );
            outgoing.entry(source).or_default().push(index);
        }

        Ok(Self {
            graph,
            indices,
            outgoing,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    pub fn node_id(&self, index: NodeIndex) -> &str {
        &self.graph[index]
    }

    /// Outgoing edges of a node, in input-edge order.
    pub fn out_edges(&self, node: NodeIndex) -> &[EdgeIndex] {
        self.outgoing.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges from `a` to `b`, in input-edge order.
    pub fn edges_between(&self, a: NodeIndex, b: NodeIndex) -> Vec<EdgeIndex> {
        self.out_edges(a)
            .iter()
            .copied()
            .filter(|&e| self.edge_endpoints(e).1 == b)
            .collect()
    }

    pub fn edge_endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(edge)
            .expect("edge index out of bounds")
    }

    pub fn gain(&self, edge: EdgeIndex) -> &E {
        &self.graph[edge].gain
    }

    pub fn label(&self, edge: EdgeIndex) -> &str {
        &self.graph[edge].label
    }

    /// All edge indices in input order.
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        self.graph.edge_indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::NumericAlgebra;

    fn specs(nodes: &[&str], edges: &[(&str, &str, &str)]) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
        (
            nodes.iter().map(|id| NodeSpec { id: id.to_string() }).collect(),
            edges
                .iter()
                .map(|(s, t, l)| EdgeSpec {
                    source: s.to_string(),
                    target: t.to_string(),
                    label: l.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_build_and_lookup() {
        let (nodes, edges) = specs(
            &["S1", "S2", "S3"],
            &[("S1", "S2", "2"), ("S2", "S3", "3"), ("S1", "S3", "5")],
        );
        let graph = FlowGraph::build(&NumericAlgebra, &nodes, &edges).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let s1 = graph.node_index("S1").unwrap();
        let out = graph.out_edges(s1);
        assert_eq!(out.len(), 2);
        // Input order preserved
        assert_eq!(*graph.gain(out[0]), 2.0);
        assert_eq!(*graph.gain(out[1]), 5.0);
        assert_eq!(graph.label(out[1]), "5");
    }

    #[test]
    fn test_parallel_edges_are_distinct() {
        let (nodes, edges) = specs(&["A", "B"], &[("A", "B", "2"), ("A", "B", "3")]);
        let graph = FlowGraph::build(&NumericAlgebra, &nodes, &edges).unwrap();

        let a = graph.node_index("A").unwrap();
        let b = graph.node_index("B").unwrap();
        let between = graph.edges_between(a, b);
        assert_eq!(between.len(), 2);
        assert_ne!(between[0], between[1]);
        assert_eq!(*graph.gain(between[0]), 2.0);
        assert_eq!(*graph.gain(between[1]), 3.0);
    }

    #[test]
    fn test_debug_formatting() {
        let (nodes, edges) = specs(&["A", "B"], &[("A", "B", "2")]);
        let graph = FlowGraph::build(&NumericAlgebra, &nodes, &edges).unwrap();
        let dump = format!("{graph:?}");
        assert!(dump.contains("FlowGraph"));
    }

    #[test]
    fn test_unknown_node_rejected() {
        let (nodes, edges) = specs(&["A"], &[("A", "B", "1")]);
        let err = FlowGraph::build(&NumericAlgebra, &nodes, &edges).unwrap_err();
        match err {
            Error::UnknownNode { edge, node } => {
                assert_eq!(edge, 0);
                assert_eq!(node, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_gain_rejected() {
        let (nodes, edges) = specs(&["A", "B"], &[("A", "B", "not a number")]);
        let err = FlowGraph::build(&NumericAlgebra, &nodes, &edges).unwrap_err();
        assert!(matches!(err, Error::InvalidGain { edge: 0, .. }));
    }
}
