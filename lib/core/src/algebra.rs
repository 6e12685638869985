//! The symbolic-algebra seam.
//!
//! The engine multiplies, adds, and simplifies gain expressions but never
//! inspects their structure. Everything it needs from an algebra backend is
//! captured by [`SymbolicAlgebra`]; the default implementation lives in the
//! `sigflow-algebra` crate.

use thiserror::Error;

/// Failures reported by an algebra backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),
}

/// Operations the engine requires from a gain-expression algebra.
///
/// Expression values are opaque and immutable: every combinator returns a
/// fresh value. The constructors (`add`, `multiply`, `neg`, `divide`) never
/// fail; [`SymbolicAlgebra::simplify`] is where undefined results (such as a
/// division by a denominator that reduces to zero) surface.
pub trait SymbolicAlgebra {
    type Expr: Clone;

    /// Parses a gain-expression label such as `"1/s"` or `"K*(s+1)"`.
    fn parse(&self, text: &str) -> Result<Self::Expr, AlgebraError>;

    /// The additive identity.
    fn zero(&self) -> Self::Expr;

    /// The multiplicative identity.
    fn one(&self) -> Self::Expr;

    fn neg(&self, a: &Self::Expr) -> Self::Expr;

    fn add(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    fn multiply(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    fn divide(&self, numer: &Self::Expr, denom: &Self::Expr) -> Self::Expr;

    /// Reduces an expression to its canonical form.
    fn simplify(&self, a: &Self::Expr) -> Result<Self::Expr, AlgebraError>;

    /// True when a simplified expression is exactly the multiplicative
    /// identity.
    fn is_one(&self, a: &Self::Expr) -> bool;

    /// Renders an expression as a string that the backend can parse back.
    fn display(&self, a: &Self::Expr) -> String;
}
