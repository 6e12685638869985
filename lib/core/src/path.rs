//! Forward-path enumeration: all simple directed paths from a source node to
//! a sink node, each annotated with the exact edges traversed.

use ahash::AHashSet;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::algebra::SymbolicAlgebra;
use crate::error::{Error, Result};
use crate::graph::FlowGraph;

/// A simple directed path from source to sink. `nodes[0]` is the source,
/// the last node is the sink, and hop `i` uses `edges[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardPath {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeIndex>,
}

impl ForwardPath {
    /// Renders the path as `"S1->S2->S3"`.
    pub fn display(&self) -> String {
        self.nodes.join("->")
    }

    pub fn node_set(&self) -> AHashSet<&str> {
        self.nodes.iter().map(String::as_str).collect()
    }

    /// Product of the traversed edge gains, in hop order. Edges are looked
    /// up by id so parallel edges contribute their own weights.
    pub fn gain<A>(&self, algebra: &A, graph: &FlowGraph<A::Expr>) -> A::Expr
    where
        A: SymbolicAlgebra,
    {
        let mut product = algebra.one();
        for &edge in &self.edges {
            product = algebra.multiply(&product, graph.gain(edge));
        }
        product
    }

    /// True when this path shares at least one node with `nodes`.
    pub fn touches(&self, nodes: &AHashSet<&str>) -> bool {
        self.nodes.iter().any(|n| nodes.contains(n.as_str()))
    }
}

struct Frame {
    node: NodeIndex,
    next: usize,
}

/// Enumerates every simple directed path from `source` to `sink`, in
/// discovery order (outgoing edges are tried in input-edge order).
///
/// `source == sink` yields exactly one zero-length path. No limit is placed
/// on the result count; exhaustive enumeration is the contract.
pub fn find_forward_paths<E>(
    graph: &FlowGraph<E>,
    source: &str,
    sink: &str,
) -> Result<Vec<ForwardPath>> {
    let src = graph
        .node_index(source)
        .ok_or_else(|| Error::NodeNotFound(source.to_string()))?;
    let dst = graph
        .node_index(sink)
        .ok_or_else(|| Error::NodeNotFound(sink.to_string()))?;

    if src == dst {
        return Ok(vec![ForwardPath {
            nodes: vec![source.to_string()],
            edges: Vec::new(),
        }]);
    }

    let mut paths = Vec::new();
    let mut frames = vec![Frame { node: src, next: 0 }];
    let mut on_path: AHashSet<NodeIndex> = AHashSet::new();
    on_path.insert(src);
    // Parallel to `frames`: path_nodes has one entry per frame, path_edges
    // one entry per hop between frames.
    let mut path_nodes = vec![src];
    let mut path_edges: Vec<EdgeIndex> = Vec::new();

    while let Some(frame) = frames.last_mut() {
        let out = graph.out_edges(frame.node);
        if frame.next >= out.len() {
            frames.pop();
            let done = path_nodes.pop().expect("path/frame stacks in sync");
            on_path.remove(&done);
            path_edges.pop();
            continue;
        }

        let edge = out[frame.next];
        frame.next += 1;
        let (_, target) = graph.edge_endpoints(edge);

        if target == dst {
            let mut nodes: Vec<String> = path_nodes
                .iter()
                .map(|&n| graph.node_id(n).to_string())
                .collect();
            nodes.push(sink.to_string());
            let mut edges = path_edges.clone();
            edges.push(edge);
            paths.push(ForwardPath { nodes, edges });
        } else if !on_path.contains(&target) {
            on_path.insert(target);
            path_nodes.push(target);
            path_edges.push(edge);
            frames.push(Frame {
                node: target,
                next: 0,
            });
        }
    }

    Ok(paths)
}
