//! # sigflow Algebra
//!
//! The gain-expression backend for the sigflow engine: an implementation of
//! the [`SymbolicAlgebra`] trait over an exact expression tree.
//!
//! - [`Expr`] - expression values: rational constants (num-rational),
//!   symbols, sums, products, integer powers, quotients
//! - [`parse`] - tokenizer and recursive-descent parser for labels such as
//!   `"1/s"` or `"K*(s+1)"`
//! - [`simplify`] - normalizing rewrite: constant folding, flattening,
//!   like-term collection, canonical ordering, quotient cancellation
//!
//! This is deliberately not a full computer-algebra system. The simplifier
//! is idempotent and strong enough for Mason-formula assembly; it does not
//! factor polynomials or prove general equivalences.
//!
//! ## Example
//!
//! ```rust
//! use sigflow_algebra::Algebra;
//! use sigflow_core::SymbolicAlgebra;
//!
//! let algebra = Algebra;
//! let a = algebra.parse("a").unwrap();
//! let b = algebra.parse("b").unwrap();
//! let product = algebra.simplify(&algebra.multiply(&a, &b)).unwrap();
//! assert_eq!(algebra.display(&product), "a*b");
//! ```

pub mod expr;
pub mod parse;
pub mod simplify;

pub use expr::Expr;
pub use parse::parse;
pub use simplify::simplify;

use sigflow_core::{AlgebraError, SymbolicAlgebra};

/// The default symbolic-algebra backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Algebra;

impl SymbolicAlgebra for Algebra {
    type Expr = Expr;

    fn parse(&self, text: &str) -> Result<Expr, AlgebraError> {
        parse::parse(text)
    }

    fn zero(&self) -> Expr {
        Expr::int(0)
    }

    fn one(&self) -> Expr {
        Expr::int(1)
    }

    fn neg(&self, a: &Expr) -> Expr {
        Expr::Mul(vec![Expr::int(-1), a.clone()])
    }

    fn add(&self, a: &Expr, b: &Expr) -> Expr {
        Expr::Add(vec![a.clone(), b.clone()])
    }

    fn multiply(&self, a: &Expr, b: &Expr) -> Expr {
        Expr::Mul(vec![a.clone(), b.clone()])
    }

    fn divide(&self, numer: &Expr, denom: &Expr) -> Expr {
        Expr::Quot(Box::new(numer.clone()), Box::new(denom.clone()))
    }

    fn simplify(&self, a: &Expr) -> Result<Expr, AlgebraError> {
        simplify::simplify(a)
    }

    fn is_one(&self, a: &Expr) -> bool {
        a.is_one()
    }

    fn display(&self, a: &Expr) -> String {
        a.to_string()
    }
}
