//! # sigflow
//!
//! Signal-flow graph analysis: derive the input-output transfer function of
//! a gain-labeled directed multigraph with Mason's Gain Formula.
//!
//! Given nodes, edges carrying symbolic gain expressions, and a
//! source/sink pair, sigflow enumerates all forward paths and elementary
//! loops, finds every order of mutually non-touching loop groups, and
//! assembles the graph determinant and transfer function both as a
//! readable `P1`/`L1` formula and as a simplified symbolic value.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install sigflow
//! sigflow --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use sigflow::prelude::*;
//!
//! let nodes = vec![
//!     NodeSpec { id: "S1".to_string() },
//!     NodeSpec { id: "S2".to_string() },
//!     NodeSpec { id: "S3".to_string() },
//! ];
//! let edges = vec![
//!     EdgeSpec { source: "S1".to_string(), target: "S2".to_string(), label: "a".to_string() },
//!     EdgeSpec { source: "S2".to_string(), target: "S3".to_string(), label: "b".to_string() },
//! ];
//!
//! let report = analyze(&Algebra, &nodes, &edges, "S1", "S3").unwrap();
//! assert_eq!(report.transfer_function.numeric_value, "a*b");
//! ```
//!
//! ## Crate Structure
//!
//! sigflow is composed of several crates:
//!
//! - [`sigflow-core`](https://docs.rs/sigflow-core) - Graph model, path and
//!   loop enumeration, non-touching groups, Mason assembly
//! - [`sigflow-algebra`](https://docs.rs/sigflow-algebra) - Gain-expression
//!   parser and normalizing simplifier over exact rationals
//! - [`sigflow-api`](https://docs.rs/sigflow-api) - REST endpoints
//!
//! ## Features
//!
//! - **Parallel edges**: edges are identified individually, so parallel
//!   gains between the same node pair stay distinct in paths and loops
//! - **Canonical loop identity**: each elementary cycle is reported once no
//!   matter where the search found it
//! - **Exact arithmetic**: gains are exact rationals and symbols, never
//!   floats
//! - **Readable formulas**: every determinant and transfer function comes
//!   with a placeholder-symbol expression string

// Re-export core types
pub use sigflow_core::{
    analyze, determinant, find_forward_paths, find_unique_loops, loop_gains,
    non_touching_groups, non_touching_pairs, path_determinant, transfer_function,
    AlgebraError, AnalysisReport, EdgeSpec, Error, Evaluated, ExprReport, FlowGraph,
    ForwardPath, Loop, LoopKey, LoopReport, NodeSpec, PathDeterminantReport,
    PathGainReport, PathReport, Result, SymbolicAlgebra,
};

// Re-export the algebra backend
pub use sigflow_algebra::{Algebra, Expr};

// Re-export API
pub use sigflow_api::{right_half_plane_roots, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        analyze, Algebra, AnalysisReport, EdgeSpec, Error, Expr, FlowGraph, ForwardPath,
        Loop, NodeSpec, RestApi, Result, SymbolicAlgebra,
    };
}
