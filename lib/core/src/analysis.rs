//! Request-level orchestration: build the graph, run the path and loop
//! finders, assemble Mason's formula, and shape the response payload.

use serde::{Deserialize, Serialize};

use crate::algebra::SymbolicAlgebra;
use crate::error::{Error, Result};
use crate::graph::{EdgeSpec, FlowGraph, NodeSpec};
use crate::loops::{find_unique_loops, loop_gains};
use crate::mason::{determinant, path_determinant, transfer_function};
use crate::path::find_forward_paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathReport {
    pub id: String,
    pub nodes: Vec<String>,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathGainReport {
    pub id: String,
    pub path: Vec<String>,
    pub gain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopReport {
    pub id: String,
    pub nodes: Vec<String>,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExprReport {
    pub expression: String,
    pub numeric_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDeterminantReport {
    pub path_id: String,
    pub path: Vec<String>,
    pub determinant: String,
}

/// The full analysis payload for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub forward_paths: Vec<PathReport>,
    pub forward_path_gains: Vec<PathGainReport>,
    pub loops: Vec<LoopReport>,
    pub loop_gains: Vec<String>,
    pub determinant: ExprReport,
    pub path_determinants: Vec<PathDeterminantReport>,
    pub transfer_function: ExprReport,
}

/// Runs the whole pipeline for one request. All intermediate state is local
/// to this call; nothing is shared or cached across requests.
pub fn analyze<A>(
    algebra: &A,
    nodes: &[NodeSpec],
    edges: &[EdgeSpec],
    source: &str,
    sink: &str,
) -> Result<AnalysisReport>
where
    A: SymbolicAlgebra,
{
    let graph = FlowGraph::build(algebra, nodes, edges)?;

    let paths = find_forward_paths(&graph, source, sink)?;
    let loops = find_unique_loops(&graph);

    let path_labels: Vec<String> = (1..=paths.len()).map(|i| format!("P{i}")).collect();
    let loop_labels: Vec<String> = (1..=loops.len()).map(|i| format!("L{i}")).collect();

    let simplify = |expr: &A::Expr| -> Result<A::Expr> {
        algebra
            .simplify(expr)
            .map_err(|e| Error::SymbolicEvaluation(e.to_string()))
    };

    let path_gains: Vec<A::Expr> = paths
        .iter()
        .map(|p| simplify(&p.gain(algebra, &graph)))
        .collect::<Result<_>>()?;
    let gains: Vec<A::Expr> = loop_gains(algebra, &graph, &loops)
        .iter()
        .map(simplify)
        .collect::<Result<_>>()?;

    let delta = determinant(algebra, &loops, &gains, &loop_labels)?;

    let mut path_determinants = Vec::with_capacity(paths.len());
    for (path, label) in paths.iter().zip(&path_labels) {
        let delta_k = path_determinant(algebra, path, &loops, &gains, &loop_labels)?;
        path_determinants.push(PathDeterminantReport {
            path_id: label.clone(),
            path: path.nodes.clone(),
            determinant: delta_k.expression,
        });
    }

    let tf = transfer_function(
        algebra,
        &paths,
        &path_gains,
        &path_labels,
        &loops,
        &gains,
        &loop_labels,
    )?;

    Ok(AnalysisReport {
        forward_paths: paths
            .iter()
            .zip(&path_labels)
            .map(|(p, label)| PathReport {
                id: label.clone(),
                nodes: p.nodes.clone(),
                display: p.display(),
            })
            .collect(),
        forward_path_gains: paths
            .iter()
            .zip(&path_labels)
            .zip(&path_gains)
            .map(|((p, label), gain)| PathGainReport {
                id: label.clone(),
                path: p.nodes.clone(),
                gain: algebra.display(gain),
            })
            .collect(),
        loops: loops
            .iter()
            .zip(&loop_labels)
            .map(|(l, label)| LoopReport {
                id: label.clone(),
                nodes: l.nodes.clone(),
                display: l.display(),
            })
            .collect(),
        loop_gains: gains.iter().map(|g| algebra.display(g)).collect(),
        determinant: ExprReport {
            expression: delta.expression,
            numeric_value: algebra.display(&delta.value),
        },
        path_determinants,
        transfer_function: ExprReport {
            expression: tf.expression,
            numeric_value: algebra.display(&tf.value),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{edge_specs, node_specs, NumericAlgebra};

    #[test]
    fn test_cascade_report() {
        let nodes = node_specs(&["S1", "S2", "S3"]);
        let edges = edge_specs(&[("S1", "S2", "2"), ("S2", "S3", "3")]);
        let report = analyze(&NumericAlgebra, &nodes, &edges, "S1", "S3").unwrap();

        assert_eq!(report.forward_paths.len(), 1);
        assert_eq!(report.forward_paths[0].id, "P1");
        assert_eq!(report.forward_paths[0].display, "S1->S2->S3");
        assert_eq!(report.forward_path_gains[0].gain, "6");
        assert!(report.loops.is_empty());
        assert_eq!(report.determinant.expression, "1");
        assert_eq!(report.determinant.numeric_value, "1");
        assert_eq!(report.transfer_function.expression, "P1");
        assert_eq!(report.transfer_function.numeric_value, "6");
    }

    #[test]
    fn test_feedback_report() {
        let nodes = node_specs(&["S1", "S2", "S3"]);
        let edges = edge_specs(&[
            ("S1", "S2", "2"),
            ("S2", "S3", "3"),
            ("S2", "S2", "-0.5"),
        ]);
        let report = analyze(&NumericAlgebra, &nodes, &edges, "S1", "S3").unwrap();

        assert_eq!(report.loops.len(), 1);
        assert_eq!(report.loops[0].id, "L1");
        assert_eq!(report.loops[0].display, "S2->S2");
        assert_eq!(report.loop_gains, vec!["-0.5".to_string()]);
        assert_eq!(report.determinant.expression, "1 -L1");
        assert_eq!(report.determinant.numeric_value, "1.5");
        assert_eq!(report.path_determinants.len(), 1);
        assert_eq!(report.path_determinants[0].path_id, "P1");
        assert_eq!(report.path_determinants[0].determinant, "1");
        assert_eq!(report.transfer_function.expression, "(P1)/(1 -L1)");
        assert_eq!(report.transfer_function.numeric_value, "4");
    }

    #[test]
    fn test_source_equals_sink_with_self_loop() {
        // The zero-length path contains its node, so the self-loop touches
        // it and is excluded from the path determinant while still scaling
        // the graph determinant.
        let nodes = node_specs(&["A", "B"]);
        let edges = edge_specs(&[("A", "A", "0.5"), ("A", "B", "1")]);
        let report = analyze(&NumericAlgebra, &nodes, &edges, "A", "A").unwrap();

        assert_eq!(report.forward_paths.len(), 1);
        assert_eq!(report.forward_paths[0].display, "A");
        assert_eq!(report.path_determinants[0].determinant, "1");
        assert_eq!(report.determinant.numeric_value, "0.5");
        // T = 1 * 1 / 0.5
        assert_eq!(report.transfer_function.numeric_value, "2");
    }

    #[test]
    fn test_unknown_source_rejected() {
        let nodes = node_specs(&["A"]);
        let report = analyze(&NumericAlgebra, &nodes, &[], "missing", "A");
        assert!(matches!(report, Err(Error::NodeNotFound(_))));
    }
}
