//! # sigflow Core
//!
//! Core engine for signal-flow graph analysis.
//!
//! Given a directed multigraph whose edges carry symbolic gain expressions,
//! this crate derives the input-output transfer function with Mason's Gain
//! Formula:
//!
//! - [`FlowGraph`] - the gain-labeled multigraph, built once per request
//! - [`find_forward_paths`] - all simple paths from source to sink
//! - [`find_unique_loops`] - all elementary cycles, de-duplicated under a
//!   canonical identity so parallel-edge variants stay distinct
//! - [`nontouching`] - groups of mutually node-disjoint loops per order
//! - [`mason`] - determinant, per-path determinants, and the transfer
//!   function, both as a `P1`/`L1` placeholder expression and a simplified
//!   symbolic value
//!
//! Gain arithmetic is delegated to a [`SymbolicAlgebra`] backend; the
//! engine never looks inside an expression. The default backend lives in
//! the `sigflow-algebra` crate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sigflow_core::{analyze, EdgeSpec, NodeSpec};
//! use sigflow_algebra::Algebra;
//!
//! let nodes = vec![NodeSpec { id: "S1".into() }, NodeSpec { id: "S2".into() }];
//! let edges = vec![EdgeSpec {
//!     source: "S1".into(),
//!     target: "S2".into(),
//!     label: "K/(s+1)".into(),
//! }];
//! let report = analyze(&Algebra, &nodes, &edges, "S1", "S2").unwrap();
//! assert_eq!(report.transfer_function.expression, "P1");
//! ```

pub mod algebra;
pub mod analysis;
pub mod error;
pub mod graph;
pub mod loops;
pub mod mason;
pub mod nontouching;
pub mod path;

#[cfg(test)]
pub(crate) mod testutil;

pub use algebra::{AlgebraError, SymbolicAlgebra};
pub use analysis::{
    analyze, AnalysisReport, ExprReport, LoopReport, PathDeterminantReport, PathGainReport,
    PathReport,
};
pub use error::{Error, Result};
pub use graph::{EdgeSpec, FlowGraph, GainEdge, NodeSpec};
pub use loops::{find_unique_loops, loop_gains, Loop, LoopKey};
pub use mason::{determinant, path_determinant, transfer_function, Evaluated};
pub use nontouching::{non_touching_groups, non_touching_pairs};
pub use path::{find_forward_paths, ForwardPath};
