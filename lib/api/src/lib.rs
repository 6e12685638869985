//! # sigflow API
//!
//! REST transport for the sigflow engine:
//!
//! - `POST /analyze` - full signal-flow-graph analysis, `{"result": ...}`
//! - `GET /health` - liveness probe
//! - `POST /calculate_rhs_roots` - right-half-plane roots of a polynomial
//!
//! Engine errors map to HTTP status codes: a missing source/sink node is
//! 404, every other rejected input is 400, both with an `{"error": ...}`
//! body.

pub mod rest;
pub mod roots;

pub use rest::RestApi;
pub use roots::{rhs_roots, right_half_plane_roots, RootsError};
