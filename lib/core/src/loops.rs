//! Elementary-loop enumeration with canonical de-duplication.
//!
//! Every edge seeds a search for cycles through that edge, so the same cycle
//! is discovered repeatedly from different starting points. A [`LoopKey`]
//! (sorted node multiset plus sorted edge-id multiset) gives each loop a
//! canonical identity: cycles found from different seeds collapse to one
//! entry, while cycles through different parallel edges stay distinct.

use ahash::AHashSet;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::algebra::SymbolicAlgebra;
use crate::graph::FlowGraph;

/// An elementary cycle. `nodes` is closed (first == last) and hop `i` uses
/// `edges[i]`, so `edges.len() == nodes.len() - 1`. A self-loop is
/// `nodes == [n, n]` with a single edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeIndex>,
}

/// Canonical identity of a loop: two loops are the same loop iff their keys
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopKey {
    nodes: Vec<String>,
    edges: Vec<EdgeIndex>,
}

impl Loop {
    pub fn key(&self) -> LoopKey {
        let mut nodes: Vec<String> = self.nodes[..self.nodes.len() - 1].to_vec();
        nodes.sort();
        let mut edges = self.edges.clone();
        edges.sort();
        LoopKey { nodes, edges }
    }

    /// Renders the loop closed, e.g. `"S2->S3->S2"`.
    pub fn display(&self) -> String {
        self.nodes.join("->")
    }

    /// Nodes on the loop, excluding the closing duplicate.
    pub fn node_set(&self) -> AHashSet<&str> {
        self.nodes[..self.nodes.len() - 1]
            .iter()
            .map(String::as_str)
            .collect()
    }

    pub fn min_node(&self) -> &str {
        self.nodes[..self.nodes.len() - 1]
            .iter()
            .min()
            .expect("loop has at least one node")
            .as_str()
    }

    /// True when the two loops share at least one node.
    pub fn touches(&self, other: &Loop) -> bool {
        let nodes = other.node_set();
        self.nodes[..self.nodes.len() - 1]
            .iter()
            .any(|n| nodes.contains(n.as_str()))
    }

    /// Product of the loop's edge gains in traversal order, looked up by
    /// edge id so parallel edges keep their own weights.
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
}

struct Frame {
    node: NodeIndex,
    next: usize,
}

/// Enumerates all distinct elementary loops of the graph, including
/// self-loops, sorted by `(minimum node id, loop length)` ascending.
pub fn find_unique_loops<E>(graph: &FlowGraph<E>) -> Vec<Loop> {
    let mut seen: AHashSet<LoopKey> = AHashSet::new();
    let mut loops: Vec<Loop> = Vec::new();

    let emit = |candidate: Loop, seen: &mut AHashSet<LoopKey>, loops: &mut Vec<Loop>| {
        if seen.insert(candidate.key()) {
            loops.push(candidate);
        }
    };

    for seed in graph.edge_indices() {
        let (u, v) = graph.edge_endpoints(seed);
        if u == v {
            let id = graph.node_id(u).to_string();
            emit(
                Loop {
                    nodes: vec![id.clone(), id],
                    edges: vec![seed],
                },
                &mut seen,
                &mut loops,
            );
            continue;
        }

        // DFS from v back toward u; reaching u closes a cycle through the
        // seed edge.
        let mut frames = vec![Frame { node: v, next: 0 }];
        let mut visited: AHashSet<NodeIndex> = AHashSet::new();
        visited.insert(u);
        visited.insert(v);
        let mut trail_nodes = vec![u, v];
        let mut trail_edges = vec![seed];

        while let Some(frame) = frames.last_mut() {
            let out = graph.out_edges(frame.node);
            if frame.next >= out.len() {
                frames.pop();
                let done = trail_nodes.pop().expect("trail/frame stacks in sync");
                visited.remove(&done);
                trail_edges.pop();
                continue;
            }

            let edge = out[frame.next];
            frame.next += 1;
            let (_, target) = graph.edge_endpoints(edge);

            if target == u {
                let mut nodes: Vec<String> = trail_nodes
                    .iter()
                    .map(|&n| graph.node_id(n).to_string())
                    .collect();
                nodes.push(graph.node_id(u).to_string());
                let mut edges = trail_edges.clone();
                edges.push(edge);
                emit(Loop { nodes, edges }, &mut seen, &mut loops);
            } else if !visited.contains(&target) {
                visited.insert(target);
                trail_nodes.push(target);
                trail_edges.push(edge);
                frames.push(Frame {
                    node: target,
                    next: 0,
                });
            }
        }
    }

    loops.sort_by(|a, b| {
        (a.min_node(), a.nodes.len()).cmp(&(b.min_node(), b.nodes.len()))
    });
    loops
}

/// Gains of `loops`, one per loop, in the same order.
pub fn loop_gains<A>(
    algebra: &A,
    graph: &FlowGraph<A::Expr>,
    loops: &[Loop],
) -> Vec<A::Expr>
where
    A: SymbolicAlgebra,
{
    loops.iter().map(|l| l.gain(algebra, graph)).collect()
}
