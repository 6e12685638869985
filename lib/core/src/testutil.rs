//! Test helpers: a floating-point algebra so the engine can be checked
//! numerically without a symbolic backend.

use crate::algebra::{AlgebraError, SymbolicAlgebra};
use crate::graph::{EdgeSpec, FlowGraph, NodeSpec};

pub(crate) struct NumericAlgebra;

impl SymbolicAlgebra for NumericAlgebra {
    type Expr = f64;

    fn parse(&self, text: &str) -> Result<f64, AlgebraError> {
        text.trim()
            .parse()
            .map_err(|_| AlgebraError::Parse(format!("invalid number: {text}")))
    }

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn neg(&self, a: &f64) -> f64 {
        -a
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn multiply(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    fn divide(&self, numer: &f64, denom: &f64) -> f64 {
        numer / denom
    }

    fn simplify(&self, a: &f64) -> Result<f64, AlgebraError> {
        if a.is_finite() {
            Ok(*a)
        } else {
            Err(AlgebraError::Evaluation("result is not finite".to_string()))
        }
    }

    fn is_one(&self, a: &f64) -> bool {
        (a - 1.0).abs() < 1e-12
    }

    fn display(&self, a: &f64) -> String {
        if a.fract() == 0.0 && a.abs() < 1e15 {
            format!("{}", *a as i64)
        } else {
            format!("{a}")
        }
    }
}

pub(crate) fn node_specs(ids: &[&str]) -> Vec<NodeSpec> {
    ids.iter().map(|id| NodeSpec { id: id.to_string() }).collect()
}

pub(crate) fn edge_specs(edges: &[(&str, &str, &str)]) -> Vec<EdgeSpec> {
    edges
        .iter()
        .map(|(source, target, label)| EdgeSpec {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        })
        .collect()
}

pub(crate) fn build_numeric(nodes: &[&str], edges: &[(&str, &str, &str)]) -> FlowGraph<f64> {
    FlowGraph::build(&NumericAlgebra, &node_specs(nodes), &edge_specs(edges))
        .expect("test graph builds")
}
