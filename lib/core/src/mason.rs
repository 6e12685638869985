//! Determinant and transfer-function assembly (Mason's Gain Formula).
//!
//! The graph determinant is
//!
//! ```text
//! Δ = 1 - Σ Lᵢ + Σ LᵢLⱼ - Σ LᵢLⱼLₖ + ...
//! ```
//!
//! where the order-k sums run over the non-touching groups of order k with
//! sign (-1)^k. A path determinant Δₖ is the same formula restricted to the
//! loops that do not touch forward path k, and the transfer function is
//! `T = Σ(Pₖ·Δₖ) / Δ`. Every result carries both a placeholder-symbol
//! expression string (`P1`, `L1`, ...) and the simplified symbolic value.

use crate::algebra::SymbolicAlgebra;
use crate::error::{Error, Result};
use crate::loops::Loop;
use crate::nontouching::non_touching_groups;
use crate::path::ForwardPath;

/// A value paired with its placeholder-symbol rendering.
#[derive(Debug, Clone)]
pub struct Evaluated<E> {
    pub expression: String,
    pub value: E,
}

/// Computes the graph determinant Δ over `loops`. `gains` and `labels` are
/// parallel to `loops`; labels are the `L#` placeholders used in the
/// expression string. With no loops Δ is exactly 1 and no group search runs.
pub fn determinant<A>(
    algebra: &A,
    loops: &[Loop],
    gains: &[A::Expr],
    labels: &[String],
) -> Result<Evaluated<A::Expr>>
where
    A: SymbolicAlgebra,
{
    if loops.is_empty() {
        return Ok(Evaluated {
            expression: "1".to_string(),
            value: algebra.one(),
        });
    }

    let mut terms = vec!["1".to_string()];
    let mut value = algebra.one();

    for (label, gain) in labels.iter().zip(gains) {
        terms.push(format!("-{label}"));
        value = algebra.add(&value, &algebra.neg(gain));
    }

    for (order, groups) in &non_touching_groups(loops) {
        let sign = if order % 2 == 0 { "+" } else { "-" };
        for group in groups {
            let symbols: Vec<&str> = group.iter().map(|&i| labels[i].as_str()).collect();
            terms.push(format!("{sign}{}", symbols.join("*")));

            let mut product = algebra.one();
            for &i in group {
                product = algebra.multiply(&product, &gains[i]);
            }
            if order % 2 == 0 {
                value = algebra.add(&value, &product);
            } else {
                value = algebra.add(&value, &algebra.neg(&product));
            }
        }
    }

    let value = algebra
        .simplify(&value)
        .map_err(|e| Error::SymbolicEvaluation(e.to_string()))?;

    Ok(Evaluated {
        expression: terms.join(" "),
        value,
    })
}

/// Computes Δₖ for one forward path: the determinant restricted to the
/// loops whose node sets are disjoint from the path. Labels of the
/// surviving loops keep their original `L#` names.
pub fn path_determinant<A>(
    algebra: &A,
    path: &ForwardPath,
    loops: &[Loop],
    gains: &[A::Expr],
    labels: &[String],
) -> Result<Evaluated<A::Expr>>
where
    A: SymbolicAlgebra,
{
    let path_nodes = path.node_set();
    let mut kept_loops = Vec::new();
    let mut kept_gains = Vec::new();
    let mut kept_labels = Vec::new();
    for (i, l) in loops.iter().enumerate() {
        if !l.node_set().iter().any(|n| path_nodes.contains(n)) {
            kept_loops.push(l.clone());
            kept_gains.push(gains[i].clone());
            kept_labels.push(labels[i].clone());
        }
    }
    determinant(algebra, &kept_loops, &kept_gains, &kept_labels)
}

/// Assembles the transfer function `T = Σ(Pₖ·Δₖ) / Δ`.
///
/// `path_gains`/`path_labels` are parallel to `paths`, and
/// `gains`/`labels` to `loops`. With no forward paths the numerator is the
/// additive identity and T is zero.
pub fn transfer_function<A>(
    algebra: &A,
    paths: &[ForwardPath],
    path_gains: &[A::Expr],
    path_labels: &[String],
    loops: &[Loop],
    gains: &[A::Expr],
    labels: &[String],
) -> Result<Evaluated<A::Expr>>
where
    A: SymbolicAlgebra,
{
    let delta = determinant(algebra, loops, gains, labels)?;

    let mut numerator_terms = Vec::with_capacity(paths.len());
    let mut numerator = algebra.zero();
    for ((path, gain), label) in paths.iter().zip(path_gains).zip(path_labels) {
        let delta_k = path_determinant(algebra, path, loops, gains, labels)?;
        if delta_k.expression == "1" {
            numerator_terms.push(label.clone());
        } else {
            numerator_terms.push(format!("{label}*({})", delta_k.expression));
        }
        numerator = algebra.add(&numerator, &algebra.multiply(gain, &delta_k.value));
    }

    let numerator_expr = if numerator_terms.is_empty() {
        "0".to_string()
    } else {
        numerator_terms.join(" + ")
    };

    let numerator = algebra
        .simplify(&numerator)
        .map_err(|e| Error::SymbolicEvaluation(e.to_string()))?;

    let expression = if delta.expression == "1" {
        numerator_expr
    } else {
        format!("({numerator_expr})/({})", delta.expression)
    };
    let value = if algebra.is_one(&delta.value) {
        numerator
    } else {
        algebra
            .simplify(&algebra.divide(&numerator, &delta.value))
            .map_err(|e| Error::SymbolicEvaluation(e.to_string()))?
    };

    Ok(Evaluated { expression, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loops::{find_unique_loops, loop_gains};
    use crate::path::find_forward_paths;
    use crate::testutil::{build_numeric, NumericAlgebra};

    fn labels(prefix: &str, count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_zero_loop_determinant_is_one() {
        let delta = determinant::<NumericAlgebra>(&NumericAlgebra, &[], &[], &[]).unwrap();
        assert_eq!(delta.expression, "1");
        assert_eq!(delta.value, 1.0);
    }

    #[test]
    fn test_single_loop_determinant() {
        let graph = build_numeric(
            &["S1", "S2", "S3"],
            &[("S1", "S2", "2"), ("S2", "S3", "3"), ("S2", "S2", "-0.5")],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let delta = determinant(&NumericAlgebra, &loops, &gains, &labels("L", 1)).unwrap();

        assert_eq!(delta.expression, "1 -L1");
        assert_eq!(delta.value, 1.5);
    }

    #[test]
    fn test_second_order_term_sign() {
        // Two node-disjoint loops with gains 0.5 and 0.25:
        // delta = 1 - 0.75 + 0.125
        let graph = build_numeric(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", "1"),
                ("B", "A", "0.5"),
                ("C", "D", "1"),
                ("D", "C", "0.25"),
            ],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let delta = determinant(&NumericAlgebra, &loops, &gains, &labels("L", 2)).unwrap();

        assert_eq!(delta.expression, "1 -L1 -L2 +L1*L2");
        assert!((delta.value - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_path_determinant_restriction() {
        // Loop C<->D does not touch path A->B; loop A<->B does.
        let graph = build_numeric(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", "1"),
                ("B", "A", "0.5"),
                ("C", "D", "1"),
                ("D", "C", "0.25"),
            ],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let paths = find_forward_paths(&graph, "A", "B").unwrap();
        let lbls = labels("L", 2);

        let delta_k =
            path_determinant(&NumericAlgebra, &paths[0], &loops, &gains, &lbls).unwrap();
        assert_eq!(delta_k.expression, "1 -L2");
        assert_eq!(delta_k.value, 0.75);
    }

    #[test]
    fn test_path_touching_every_loop_gets_unit_determinant() {
        let graph = build_numeric(
            &["A", "B"],
            &[("A", "B", "1"), ("B", "A", "0.5")],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let paths = find_forward_paths(&graph, "A", "B").unwrap();

        let delta_k =
            path_determinant(&NumericAlgebra, &paths[0], &loops, &gains, &labels("L", 1))
                .unwrap();
        assert_eq!(delta_k.expression, "1");
        assert_eq!(delta_k.value, 1.0);
    }

    #[test]
    fn test_transfer_function_no_paths_is_zero() {
        let graph = build_numeric(&["A", "B", "C"], &[("B", "C", "1")]);
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let paths = find_forward_paths(&graph, "A", "C").unwrap();
        assert!(paths.is_empty());

        let tf = transfer_function(
            &NumericAlgebra,
            &paths,
            &[],
            &[],
            &loops,
            &gains,
            &labels("L", loops.len()),
        )
        .unwrap();
        assert_eq!(tf.expression, "0");
        assert_eq!(tf.value, 0.0);
    }

    #[test]
    fn test_transfer_function_feedback() {
        // Gain 6 cascade with a -0.5 self-loop on the middle node:
        // T = 6 / 1.5 = 4.
        let graph = build_numeric(
            &["S1", "S2", "S3"],
            &[("S1", "S2", "2"), ("S2", "S3", "3"), ("S2", "S2", "-0.5")],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let paths = find_forward_paths(&graph, "S1", "S3").unwrap();
        let path_gains: Vec<f64> = paths
            .iter()
            .map(|p| p.gain(&NumericAlgebra, &graph))
            .collect();

        let tf = transfer_function(
            &NumericAlgebra,
            &paths,
            &path_gains,
            &labels("P", paths.len()),
            &loops,
            &gains,
            &labels("L", loops.len()),
        )
        .unwrap();
        assert_eq!(tf.expression, "(P1)/(1 -L1)");
        assert!((tf.value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_transfer_function_linear_in_path_gain() {
        let graph = build_numeric(
            &["S1", "S2", "S3"],
            &[("S1", "S2", "2"), ("S2", "S3", "3"), ("S2", "S2", "-0.5")],
        );
        let loops = find_unique_loops(&graph);
        let gains = loop_gains(&NumericAlgebra, &graph, &loops);
        let paths = find_forward_paths(&graph, "S1", "S3").unwrap();
        let path_gains: Vec<f64> = paths
            .iter()
            .map(|p| p.gain(&NumericAlgebra, &graph))
            .collect();
        let scaled: Vec<f64> = path_gains.iter().map(|g| g * 3.0).collect();

        let p_lbls = labels("P", paths.len());
        let l_lbls = labels("L", loops.len());
        let base = transfer_function(
            &NumericAlgebra, &paths, &path_gains, &p_lbls, &loops, &gains, &l_lbls,
        )
        .unwrap();
        let tripled = transfer_function(
            &NumericAlgebra, &paths, &scaled, &p_lbls, &loops, &gains, &l_lbls,
        )
        .unwrap();
        assert!((tripled.value - 3.0 * base.value).abs() < 1e-12);
    }
}
