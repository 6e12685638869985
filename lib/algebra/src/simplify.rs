//! Normalizing simplifier.
//!
//! Rewrites an expression into a canonical form: constants folded into
//! exact rationals, sums and products flattened, like terms collected,
//! repeated factors merged into powers, operands in a fixed total order,
//! and at most one quotient at the top with numerator and denominator
//! reduced by their common factors. The rewrite is idempotent, which is
//! what makes display/parse round trips stable.
//!
//! Invariants of the output:
//! - a `Quot` only appears as the outermost node, with quotient-free sides;
//! - a `Mul` has at most one constant, in first position, and sorted
//!   factors with no repeated base;
//! - an `Add` has at most one constant, in first position, and sorted,
//!   coefficient-collected terms;
//! - `Pow` exponents are >= 2.

use num_rational::BigRational;
use num_traits::{One, Zero};
use sigflow_core::AlgebraError;
use std::collections::BTreeMap;

use crate::expr::Expr;

pub fn simplify(expr: &Expr) -> Result<Expr, AlgebraError> {
    match expr {
        Expr::Num(_) | Expr::Sym(_) => Ok(expr.clone()),
        Expr::Add(terms) => normalize_sum(terms),
        Expr::Mul(factors) => normalize_product(factors),
        Expr::Pow(base, exp) => normalize_power(base, *exp),
        Expr::Quot(numer, denom) => normalize_quotient(numer, denom),
    }
}

fn rat_pow(r: &BigRational, exp: i32) -> BigRational {
    let m = exp.unsigned_abs() as usize;
    let numer = num_traits::pow(r.numer().clone(), m);
    let denom = num_traits::pow(r.denom().clone(), m);
    if exp >= 0 {
        BigRational::new(numer, denom)
    } else {
        BigRational::new(denom, numer)
    }
}

/// Splits a normalized term into its rational coefficient and the
/// remaining factors. An empty factor list means the term is constant.
fn split_term(term: Expr) -> (BigRational, Vec<Expr>) {
    match term {
        Expr::Num(r) => (r, Vec::new()),
        Expr::Mul(mut factors) => match factors.first() {
            Some(Expr::Num(_)) => {
                let Expr::Num(r) = factors.remove(0) else {
                    unreachable!()
                };
                (r, factors)
            }
            _ => (BigRational::one(), factors),
        },
        other => (BigRational::one(), vec![other]),
    }
}

fn rebuild_term(coeff: BigRational, mut factors: Vec<Expr>) -> Expr {
    if factors.is_empty() {
        return Expr::Num(coeff);
    }
    if coeff.is_one() {
        if factors.len() == 1 {
            return factors.pop().expect("one factor");
        }
        return Expr::Mul(factors);
    }
    let mut out = vec![Expr::Num(coeff)];
    out.append(&mut factors);
    Expr::Mul(out)
}

fn make_pow(base: Expr, exp: i64) -> Expr {
    if exp == 1 {
        base
    } else {
        Expr::Pow(Box::new(base), exp as i32)
    }
}

fn normalize_sum(terms: &[Expr]) -> Result<Expr, AlgebraError> {
    let mut flat = Vec::new();
    for term in terms {
        match simplify(term)? {
            Expr::Add(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    // A sum containing quotients becomes one quotient over the product of
    // all denominators; cancellation happens in the quotient rewrite.
    if flat.iter().any(|t| matches!(t, Expr::Quot(..))) {
        let parts: Vec<(Expr, Expr)> = flat
            .into_iter()
            .map(|t| match t {
                Expr::Quot(n, d) => (*n, *d),
                other => (other, Expr::int(1)),
            })
            .collect();
        let numer_terms: Vec<Expr> = parts
            .iter()
            .enumerate()
            .map(|(i, (n, _))| {
                let mut factors = vec![n.clone()];
                for (j, (_, d)) in parts.iter().enumerate() {
                    if i != j {
                        factors.push(d.clone());
                    }
                }
                Expr::Mul(factors)
            })
            .collect();
        let denom = Expr::Mul(parts.into_iter().map(|(_, d)| d).collect());
        return normalize_quotient(&Expr::Add(numer_terms), &denom);
    }

    let mut constant = BigRational::zero();
    let mut collected: BTreeMap<Vec<Expr>, BigRational> = BTreeMap::new();
    for term in flat {
        let (coeff, core) = split_term(term);
        if core.is_empty() {
            constant += coeff;
        } else {
            *collected.entry(core).or_insert_with(BigRational::zero) += coeff;
        }
    }

    let mut out = Vec::new();
    if !constant.is_zero() {
        out.push(Expr::Num(constant));
    }
    for (core, coeff) in collected {
        if !coeff.is_zero() {
            out.push(rebuild_term(coeff, core));
        }
    }

    match out.len() {
        0 => Ok(Expr::int(0)),
        1 => Ok(out.pop().expect("one term")),
        _ => Ok(Expr::Add(out)),
    }
}

fn normalize_product(factors: &[Expr]) -> Result<Expr, AlgebraError> {
    let mut flat = Vec::new();
    for factor in factors {
        match simplify(factor)? {
            Expr::Mul(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    // Quotient factors lift to one quotient around the whole product.
    if flat.iter().any(|f| matches!(f, Expr::Quot(..))) {
        let mut numers = Vec::new();
        let mut denoms = Vec::new();
        for factor in flat {
            match factor {
                Expr::Quot(n, d) => {
                    numers.push(*n);
                    denoms.push(*d);
                }
                other => numers.push(other),
            }
        }
        return normalize_quotient(&Expr::Mul(numers), &Expr::Mul(denoms));
    }

    let mut coeff = BigRational::one();
    let mut powers: BTreeMap<Expr, i64> = BTreeMap::new();
    for factor in flat {
        match factor {
            Expr::Num(r) => coeff *= r,
            Expr::Pow(base, exp) => *powers.entry(*base).or_insert(0) += i64::from(exp),
            other => *powers.entry(other).or_insert(0) += 1,
        }
    }
    if coeff.is_zero() {
        return Ok(Expr::int(0));
    }

    let mut numer_factors = Vec::new();
    let mut denom_factors = Vec::new();
    for (base, exp) in powers {
        match exp.cmp(&0) {
            std::cmp::Ordering::Equal => {}
            std::cmp::Ordering::Greater => numer_factors.push(make_pow(base, exp)),
            std::cmp::Ordering::Less => denom_factors.push(make_pow(base, -exp)),
        }
    }

    if denom_factors.is_empty() {
        Ok(rebuild_term(coeff, numer_factors))
    } else {
        finish_quotient(
            rebuild_term(coeff, numer_factors),
            rebuild_term(BigRational::one(), denom_factors),
        )
    }
}

fn normalize_power(base: &Expr, exp: i32) -> Result<Expr, AlgebraError> {
    let base = simplify(base)?;
    if exp == 0 {
        return Ok(Expr::int(1));
    }
    if exp == 1 {
        return Ok(base);
    }
    match base {
        Expr::Num(r) => {
            if r.is_zero() && exp < 0 {
                Err(AlgebraError::Evaluation(
                    "zero raised to a negative power".to_string(),
                ))
            } else {
                Ok(Expr::Num(rat_pow(&r, exp)))
            }
        }
        Expr::Pow(inner, inner_exp) => normalize_power(&inner, inner_exp * exp),
        Expr::Mul(factors) => {
            let raised: Vec<Expr> = factors
                .into_iter()
                .map(|f| Expr::Pow(Box::new(f), exp))
                .collect();
            normalize_product(&raised)
        }
        Expr::Quot(numer, denom) => {
            if exp > 0 {
                normalize_quotient(
                    &Expr::Pow(numer, exp),
                    &Expr::Pow(denom, exp),
                )
            } else {
                normalize_quotient(
                    &Expr::Pow(denom, -exp),
                    &Expr::Pow(numer, -exp),
                )
            }
        }
        other => {
            if exp < 0 {
                Ok(Expr::Quot(
                    Box::new(Expr::int(1)),
                    Box::new(make_pow(other, i64::from(-exp))),
                ))
            } else {
                Ok(Expr::Pow(Box::new(other), exp))
            }
        }
    }
}

fn normalize_quotient(numer: &Expr, denom: &Expr) -> Result<Expr, AlgebraError> {
    let numer = simplify(numer)?;
    let denom = simplify(denom)?;
    match (numer, denom) {
        (Expr::Quot(a, b), Expr::Quot(c, d)) => {
            normalize_quotient(&Expr::Mul(vec![*a, *d]), &Expr::Mul(vec![*b, *c]))
        }
        (Expr::Quot(a, b), denom) => {
            normalize_quotient(&a, &Expr::Mul(vec![*b, denom]))
        }
        (numer, Expr::Quot(c, d)) => {
            normalize_quotient(&Expr::Mul(vec![numer, *d]), &c)
        }
        (numer, denom) => finish_quotient(numer, denom),
    }
}

/// Final quotient assembly over quotient-free, normalized sides: rejects a
/// zero denominator, folds constant denominators into the numerator, and
/// cancels common factors.
fn finish_quotient(numer: Expr, denom: Expr) -> Result<Expr, AlgebraError> {
    if denom.is_zero() {
        return Err(AlgebraError::Evaluation("division by zero".to_string()));
    }
    if numer.is_zero() {
        return Ok(Expr::int(0));
    }
    if let Expr::Num(r) = denom {
        let inverse = Expr::Num(BigRational::one() / r);
        return normalize_product(&[inverse, numer]);
    }
    if numer == denom {
        return Ok(Expr::int(1));
    }

    let (numer_coeff, mut numer_powers) = decompose(numer);
    let (denom_coeff, mut denom_powers) = decompose(denom);

    let shared: Vec<Expr> = numer_powers
        .keys()
        .filter(|base| denom_powers.contains_key(*base))
        .cloned()
        .collect();
    for base in shared {
        let n = numer_powers[&base];
        let d = denom_powers[&base];
        let common = n.min(d);
        *numer_powers.get_mut(&base).expect("present") -= common;
        *denom_powers.get_mut(&base).expect("present") -= common;
    }

    let coeff = numer_coeff / denom_coeff;
    let numer_factors: Vec<Expr> = numer_powers
        .into_iter()
        .filter(|&(_, e)| e > 0)
        .map(|(b, e)| make_pow(b, e))
        .collect();
    let denom_factors: Vec<Expr> = denom_powers
        .into_iter()
        .filter(|&(_, e)| e > 0)
        .map(|(b, e)| make_pow(b, e))
        .collect();

    let numer = rebuild_term(coeff, numer_factors);
    if denom_factors.is_empty() {
        return Ok(numer);
    }
    let denom = rebuild_term(BigRational::one(), denom_factors);
    Ok(Expr::Quot(Box::new(numer), Box::new(denom)))
}

/// Multiplicative decomposition of a quotient-free normalized expression:
/// rational coefficient plus base-to-exponent map. A sum counts as a
/// single base.
fn decompose(expr: Expr) -> (BigRational, BTreeMap<Expr, i64>) {
    let mut powers = BTreeMap::new();
    let coeff = match expr {
        Expr::Num(r) => r,
        Expr::Mul(factors) => {
            let mut coeff = BigRational::one();
            for factor in factors {
                match factor {
                    Expr::Num(r) => coeff *= r,
                    Expr::Pow(base, exp) => *powers.entry(*base).or_insert(0) += i64::from(exp),
                    other => *powers.entry(other).or_insert(0) += 1,
                }
            }
            coeff
        }
        Expr::Pow(base, exp) => {
            powers.insert(*base, i64::from(exp));
            BigRational::one()
        }
        other => {
            powers.insert(other, 1);
            BigRational::one()
        }
    };
    (coeff, powers)
}
