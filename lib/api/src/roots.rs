//! Right-half-plane root filtering.
//!
//! Given real polynomial coefficients (highest degree first), finds the
//! roots with positive real part. Roots are the complex eigenvalues of the
//! monic companion matrix, rendered in engineering `a+bj` notation.

use nalgebra::{Complex, DMatrix};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RootsError {
    #[error("no coefficients provided")]
    Empty,
}

/// Roots of the polynomial with positive real part, as `a+bj` strings.
///
/// Leading zero coefficients are stripped; a constant polynomial has no
/// roots and yields an empty list.
pub fn right_half_plane_roots(coefficients: &[f64]) -> Result<Vec<String>, RootsError> {
    Ok(rhs_roots(coefficients)?.iter().map(format_root).collect())
}

pub fn rhs_roots(coefficients: &[f64]) -> Result<Vec<Complex<f64>>, RootsError> {
    if coefficients.is_empty() {
        return Err(RootsError::Empty);
    }
    let Some(first) = coefficients.iter().position(|&c| c != 0.0) else {
        return Ok(Vec::new());
    };
    let coefficients = &coefficients[first..];
    let degree = coefficients.len() - 1;
    if degree == 0 {
        return Ok(Vec::new());
    }

    let lead = coefficients[0];
    let mut companion = DMatrix::<f64>::zeros(degree, degree);
    for (column, &coeff) in coefficients[1..].iter().enumerate() {
        companion[(0, column)] = -coeff / lead;
    }
    for row in 1..degree {
        companion[(row, row - 1)] = 1.0;
    }

    Ok(companion
        .complex_eigenvalues()
        .iter()
        .filter(|root| root.re > 0.0)
        .copied()
        .collect())
}

fn format_root(root: &Complex<f64>) -> String {
    if root.im >= 0.0 {
        format!("{}+{}j", root.re, root.im)
    } else {
        format!("{}-{}j", root.re, -root.im)
    }
}
