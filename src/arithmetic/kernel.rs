use nalgebra::Vector3;
use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::Zero;

use crate::arithmetic::widen::{demote_ratio, RationalWidth};
use crate::error::{Error, Result};

/// Folds a rational into [0, 1) so that `r - back_to_unit(r)` is an integer.
///
/// Works on the numerator/denominator pair directly with integer modulo,
/// so it cannot overflow at any width.
pub fn back_to_unit<T: RationalWidth>(r: &Ratio<T>) -> Ratio<T> {
    // gcd(n mod d, d) = gcd(n, d) = 1, so the result is still reduced
    Ratio::new_raw(r.numer().mod_floor(r.denom()), r.denom().clone())
}

/// Exact singularity test of a 3×3 rational matrix given as three columns.
///
/// Runs the elimination at the narrowest width that can represent the
/// entries and widens on multiplication overflow; only an overflow at
/// arbitrary precision surfaces as [`Error::SolverOverflow`].
pub fn is_singular(cols: &[[BigRational; 3]; 3]) -> Result<bool> {
    if let Some(m) = demote_cols::<i8>(cols) {
        if let Some(answer) = is_singular_checked(&m) {
            return Ok(answer);
        }
    }
    if let Some(m) = demote_cols::<i16>(cols) {
        if let Some(answer) = is_singular_checked(&m) {
            return Ok(answer);
        }
    }
    if let Some(m) = demote_cols::<i32>(cols) {
        if let Some(answer) = is_singular_checked(&m) {
            return Ok(answer);
        }
    }
    if let Some(m) = demote_cols::<i64>(cols) {
        if let Some(answer) = is_singular_checked(&m) {
            return Ok(answer);
        }
    }
    if let Some(m) = demote_cols::<i128>(cols) {
        if let Some(answer) = is_singular_checked(&m) {
            return Ok(answer);
        }
    }
    is_singular_checked(cols).ok_or_else(|| {
        Error::SolverOverflow("singularity test overflowed arbitrary-precision arithmetic".into())
    })
}

/// True iff at least three of the given columns span ℚ³.
///
/// Finds the first non-zero column u₁, skips columns that are rational
/// multiples of u₁ to find u₂, then probes each later column w with a
/// singularity test of [u₁|u₂|w], succeeding on the first non-singular
/// triple. The column order is part of the contract.
pub fn is_rank3(cols: &[[BigRational; 3]]) -> Result<bool> {
    let Some(i1) = cols.iter().position(|c| !column_is_zero(c)) else {
        return Ok(false);
    };
    let u1 = &cols[i1];

    let mut second = None;
    for (k, w) in cols.iter().enumerate().skip(i1 + 1) {
        if !is_colinear(u1, w) {
            second = Some(k);
            break;
        }
    }
    let Some(i2) = second else {
        return Ok(false);
    };
    let u2 = &cols[i2];

    for w in &cols[i2 + 1..] {
        let probe = [u1.clone(), u2.clone(), w.clone()];
        if !is_singular(&probe)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Rank in {0, 1, 2, 3} of the lattice spanned by a set of ℤ³ vectors.
pub fn lattice_rank(vs: &[Vector3<i64>]) -> Result<usize> {
    let cols: Vec<[BigRational; 3]> = vs.iter().map(int_column).collect();

    let Some(i1) = cols.iter().position(|c| !column_is_zero(c)) else {
        return Ok(0);
    };
    let u1 = &cols[i1];

    let mut second = None;
    for (k, w) in cols.iter().enumerate().skip(i1 + 1) {
        if !is_colinear(u1, w) {
            second = Some(k);
            break;
        }
    }
    let Some(i2) = second else {
        return Ok(1);
    };
    let u2 = &cols[i2];

    for w in &cols[i2 + 1..] {
        let probe = [u1.clone(), u2.clone(), w.clone()];
        if !is_singular(&probe)? {
            return Ok(3);
        }
    }
    Ok(2)
}

fn int_column(v: &Vector3<i64>) -> [BigRational; 3] {
    [
        BigRational::from_integer(BigInt::from(v.x)),
        BigRational::from_integer(BigInt::from(v.y)),
        BigRational::from_integer(BigInt::from(v.z)),
    ]
}

fn column_is_zero<T: RationalWidth>(col: &[Ratio<T>; 3]) -> bool {
    col.iter().all(Zero::is_zero)
}

/// Whether `w` is a rational multiple of the non-zero column `u`.
fn is_colinear(u: &[BigRational; 3], w: &[BigRational; 3]) -> bool {
    // all 2×2 minors of [u|w] vanish; BigRational products cannot overflow
    &u[0] * &w[1] == &u[1] * &w[0]
        && &u[0] * &w[2] == &u[2] * &w[0]
        && &u[1] * &w[2] == &u[2] * &w[1]
}

fn demote_cols<T: RationalWidth>(cols: &[[BigRational; 3]; 3]) -> Option<[[Ratio<T>; 3]; 3]> {
    let mut out: Vec<[Ratio<T>; 3]> = Vec::with_capacity(3);
    for col in cols {
        out.push([
            demote_ratio(&col[0])?,
            demote_ratio(&col[1])?,
            demote_ratio(&col[2])?,
        ]);
    }
    out.try_into().ok()
}

/// One rung of the ladder: the elimination of the first row with checked
/// arithmetic. `None` signals overflow at this width.
fn is_singular_checked<T: RationalWidth>(cols: &[[Ratio<T>; 3]; 3]) -> Option<bool> {
    // first column with a non-zero entry in the first row, ties broken left to right
    let Some(p) = (0..3).find(|&c| !cols[c][0].is_zero()) else {
        // the whole first row vanishes
        return Some(true);
    };
    let (j, k) = match p {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };

    let fj = ratio_checked_div(&cols[j][0], &cols[p][0])?;
    let fk = ratio_checked_div(&cols[k][0], &cols[p][0])?;

    let a = ratio_checked_sub(&cols[j][1], &ratio_checked_mul(&fj, &cols[p][1])?)?;
    let c = ratio_checked_sub(&cols[j][2], &ratio_checked_mul(&fj, &cols[p][2])?)?;
    let b = ratio_checked_sub(&cols[k][1], &ratio_checked_mul(&fk, &cols[p][1])?)?;
    let d = ratio_checked_sub(&cols[k][2], &ratio_checked_mul(&fk, &cols[p][2])?)?;

    let det = ratio_checked_sub(&ratio_checked_mul(&a, &d)?, &ratio_checked_mul(&b, &c)?)?;
    Some(det.is_zero())
}

// The Checked* bounds of RationalWidth live on the numerator/denominator
// type, so the rational operations below work on those components and
// reassemble the ratio; `None` means the components overflowed this
// width. Inputs are reduced with positive denominators and the results
// keep both invariants, so `Ratio::new_raw` applies throughout.

fn reassemble<T: RationalWidth>(numer: T, denom: T) -> Ratio<T> {
    if numer.is_zero() {
        return Ratio::new_raw(T::zero(), T::one());
    }
    let divisor = numer.gcd(&denom);
    Ratio::new_raw(numer / divisor.clone(), denom / divisor)
}

fn ratio_checked_mul<T: RationalWidth>(lhs: &Ratio<T>, rhs: &Ratio<T>) -> Option<Ratio<T>> {
    // cross-reduce first to keep the products as small as possible
    let g1 = lhs.numer().gcd(rhs.denom());
    let g2 = rhs.numer().gcd(lhs.denom());
    let numer = (lhs.numer().clone() / g1.clone()).checked_mul(&(rhs.numer().clone() / g2.clone()))?;
    let denom = (lhs.denom().clone() / g2).checked_mul(&(rhs.denom().clone() / g1))?;
    Some(Ratio::new_raw(numer, denom))
}

fn ratio_checked_div<T: RationalWidth>(lhs: &Ratio<T>, rhs: &Ratio<T>) -> Option<Ratio<T>> {
    if rhs.numer().is_zero() {
        return None;
    }
    // invert rhs, keeping the sign on the numerator
    let mut numer = rhs.denom().clone();
    let mut denom = rhs.numer().clone();
    if denom < T::zero() {
        numer = T::zero().checked_sub(&numer)?;
        denom = T::zero().checked_sub(&denom)?;
    }
    ratio_checked_mul(lhs, &Ratio::new_raw(numer, denom))
}

fn ratio_checked_sub<T: RationalWidth>(lhs: &Ratio<T>, rhs: &Ratio<T>) -> Option<Ratio<T>> {
    let ad = lhs.numer().checked_mul(rhs.denom())?;
    let cb = rhs.numer().checked_mul(lhs.denom())?;
    let numer = ad.checked_sub(&cb)?;
    let denom = lhs.denom().checked_mul(rhs.denom())?;
    Some(reassemble(numer, denom))
}
