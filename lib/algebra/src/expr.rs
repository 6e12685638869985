//! The expression tree.
//!
//! Constants are exact rationals; everything else is symbols combined by
//! sums, products, integer powers, and quotients. The derived `Ord` gives a
//! total order used by the simplifier for canonical operand ordering.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Expr {
    Num(BigRational),
    Sym(String),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Pow(Box<Expr>, i32),
    Quot(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn int(n: i64) -> Self {
        Expr::Num(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Num(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Num(r) if r.is_one())
    }

    /// If the term's leading sign is negative, returns the term with that
    /// sign stripped. Used to print `a - b` instead of `a + -b`.
    pub(crate) fn without_leading_minus(&self) -> Option<Expr> {
        match self {
            Expr::Num(r) if r.is_negative() => Some(Expr::Num(-r.clone())),
            Expr::Mul(factors) => match factors.first() {
                Some(Expr::Num(r)) if r.is_negative() => {
                    let flipped = -r.clone();
                    let rest = &factors[1..];
                    if flipped.is_one() && rest.len() == 1 {
                        Some(rest[0].clone())
                    } else if flipped.is_one() {
                        Some(Expr::Mul(rest.to_vec()))
                    } else {
                        let mut out = vec![Expr::Num(flipped)];
                        out.extend_from_slice(rest);
                        Some(Expr::Mul(out))
                    }
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn is_atom(&self) -> bool {
        match self {
            Expr::Sym(_) => true,
            Expr::Num(r) => !r.is_negative() && r.is_integer(),
            _ => false,
        }
    }
}

struct Factor<'a>(&'a Expr);

impl fmt::Display for Factor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Add(_) | Expr::Quot(..) => write!(f, "({})", self.0),
            Expr::Num(r) if r.is_negative() => write!(f, "({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(r) => {
                if r.is_integer() {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            Expr::Sym(name) => write!(f, "{name}"),
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{term}")?;
                    } else if let Some(positive) = term.without_leading_minus() {
                        write!(f, " - {positive}")?;
                    } else {
                        write!(f, " + {term}")?;
                    }
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                let mut rest = factors.as_slice();
                if let Some(Expr::Num(r)) = factors.first() {
                    // Any negative leading coefficient hoists its sign, so
                    // -2*k prints without parentheses.
                    if factors.len() > 1 && r.is_negative() {
                        write!(f, "-")?;
                        let flipped = -r.clone();
                        rest = &factors[1..];
                        if !flipped.is_one() {
                            write!(f, "{}*", Expr::Num(flipped))?;
                        }
                    }
                }
                for (i, factor) in rest.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{}", Factor(factor))?;
                }
                Ok(())
            }
            Expr::Pow(base, exp) => {
                if base.is_atom() {
                    write!(f, "{base}^{exp}")
                } else {
                    write!(f, "({base})^{exp}")
                }
            }
            Expr::Quot(numer, denom) => {
                match numer.as_ref() {
                    Expr::Add(_) | Expr::Quot(..) => write!(f, "({numer})")?,
                    _ => write!(f, "{numer}")?,
                }
                write!(f, "/")?;
                match denom.as_ref() {
                    Expr::Sym(_) | Expr::Pow(..) => write!(f, "{denom}"),
                    Expr::Num(r) if !r.is_negative() && r.is_integer() => write!(f, "{denom}"),
                    _ => write!(f, "({denom})"),
                }
            }
        }
    }
}
