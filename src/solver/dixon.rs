use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Word-size primes used for the modular factorization; all lie below
/// 2³¹, so products of two residues fit in a u64.
const PRIMES: [u64; 4] = [2_147_483_647, 2_147_483_629, 2_147_483_587, 2_147_483_579];

/// Exact solution of `A · X = Y` for a nonsingular integer matrix `A`,
/// one column of `X` per column of `Y`.
///
/// The classic Dixon scheme: factor `A` modulo a word-size prime, lift the
/// solution p-adically to a precision derived from a Hadamard bound, then
/// recover each rational entry with half-extended Euclid. The result is
/// verified exactly before it is returned.
pub fn dixon_solve(a: &[Vec<i64>], y: &[Vec<i64>]) -> Result<Vec<Vec<BigRational>>> {
    let n = a.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let Some((p, lu)) = PRIMES
        .iter()
        .find_map(|&p| ModPLu::factor(a, p).map(|lu| (p, lu)))
    else {
        return Err(Error::SolverOverflow(
            "equilibrium system is singular modulo every available prime".into(),
        ));
    };

    // |det A| and the Cramer numerators are bounded through Hadamard;
    // rational reconstruction needs p^m > 2 · num_bound · den_bound
    let den_bound = hadamard_bound(a);
    let max_y = y
        .iter()
        .flat_map(|row| row.iter())
        .map(|v| v.abs())
        .max()
        .unwrap_or(0)
        .max(1);
    let num_bound = &den_bound * BigInt::from(max_y) * BigInt::from(n as u64 + 1);

    let mut steps = lifting_steps(p, &num_bound, &den_bound);
    for _attempt in 0..3 {
        if let Some(solution) = lift_and_reconstruct(a, y, &lu, p, steps, &num_bound) {
            if verify(a, y, &solution) {
                return Ok(solution);
            }
        }
        // the bound was too tight; more p-adic digits settle it
        steps *= 2;
    }
    Err(Error::SolverOverflow(
        "rational reconstruction failed to converge".into(),
    ))
}

fn lift_and_reconstruct(
    a: &[Vec<i64>],
    y: &[Vec<i64>],
    lu: &ModPLu,
    p: u64,
    steps: u32,
    num_bound: &BigInt,
) -> Option<Vec<Vec<BigRational>>> {
    let n = a.len();
    let width = y[0].len();
    let p_big = BigInt::from(p);

    let mut modulus = BigInt::one();
    for _ in 0..steps {
        modulus *= &p_big;
    }

    let mut solution = vec![Vec::with_capacity(width); n];
    for column in 0..width {
        // p-adic lifting of one right-hand side
        let mut residual: Vec<BigInt> = y.iter().map(|row| BigInt::from(row[column])).collect();
        let mut lifted = vec![BigInt::zero(); n];
        let mut p_power = BigInt::one();

        for _ in 0..steps {
            let digits = lu.solve(&residual_mod_p(&residual, p));
            for i in 0..n {
                lifted[i] += &p_power * BigInt::from(digits[i]);
            }
            for i in 0..n {
                let mut accumulated = BigInt::zero();
                for (j, &digit) in digits.iter().enumerate() {
                    if a[i][j] != 0 && digit != 0 {
                        accumulated += BigInt::from(a[i][j]) * BigInt::from(digit);
                    }
                }
                residual[i] -= accumulated;
                debug_assert!((&residual[i] % &p_big).is_zero());
                let reduced = &residual[i] / &p_big;
                residual[i] = reduced;
            }
            p_power *= &p_big;
        }

        for (i, value) in lifted.iter().enumerate() {
            let entry = rational_reconstruction(&value.mod_floor(&modulus), &modulus, num_bound)?;
            solution[i].push(entry);
        }
        debug_assert!(solution.iter().all(|row| row.len() == column + 1));
    }
    Some(solution)
}

fn residual_mod_p(residual: &[BigInt], p: u64) -> Vec<u64> {
    let p_big = BigInt::from(p);
    residual
        .iter()
        .map(|r| {
            r.mod_floor(&p_big)
                .to_u64()
                .expect("value was just reduced modulo a word-size prime")
        })
        .collect()
}

/// Half-extended Euclid: the unique num/den with |num| ≤ num_bound,
/// den · num⁻¹ ≡ value (mod modulus), den coprime to the modulus.
fn rational_reconstruction(
    value: &BigInt,
    modulus: &BigInt,
    num_bound: &BigInt,
) -> Option<BigRational> {
    let mut r0 = modulus.clone();
    let mut r1 = value.clone();
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while &r1 > num_bound {
        let quotient = &r0 / &r1;
        let r2 = &r0 - &quotient * &r1;
        let t2 = &t0 - &quotient * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    if t1.is_zero() {
        return None;
    }
    if t1.is_negative() {
        r1 = -r1;
        t1 = -t1;
    }
    if !r1.gcd(&t1).is_one() {
        return None;
    }
    Some(BigRational::new(r1, t1))
}

fn verify(a: &[Vec<i64>], y: &[Vec<i64>], solution: &[Vec<BigRational>]) -> bool {
    let n = a.len();
    let width = y[0].len();
    for i in 0..n {
        for column in 0..width {
            let mut accumulated = BigRational::zero();
            for j in 0..n {
                if a[i][j] != 0 {
                    accumulated += BigRational::from_integer(BigInt::from(a[i][j]))
                        * &solution[j][column];
                }
            }
            if accumulated != BigRational::from_integer(BigInt::from(y[i][column])) {
                return false;
            }
        }
    }
    true
}

/// Smallest m with p^m > 2 · num_bound · den_bound.
fn lifting_steps(p: u64, num_bound: &BigInt, den_bound: &BigInt) -> u32 {
    let target = BigInt::from(2) * num_bound * den_bound;
    let p_big = BigInt::from(p);
    let mut power = BigInt::one();
    let mut steps = 0u32;
    while power <= target {
        power *= &p_big;
        steps += 1;
    }
    steps.max(1)
}

/// Product over columns of ⌈‖column‖₂⌉, a bound on |det A|.
fn hadamard_bound(a: &[Vec<i64>]) -> BigInt {
    let n = a.len();
    let mut bound = BigInt::one();
    for j in 0..n {
        let mut square_sum = BigInt::zero();
        for row in a {
            let entry = BigInt::from(row[j]);
            square_sum += &entry * &entry;
        }
        bound *= square_sum.sqrt() + 1;
    }
    bound
}

/// Dense LU factorization modulo p with partial pivoting.
struct ModPLu {
    p: u64,
    lu: Vec<Vec<u64>>,
    perm: Vec<usize>,
}

impl ModPLu {
    /// Returns `None` when the matrix is singular modulo `p`.
    fn factor(a: &[Vec<i64>], p: u64) -> Option<Self> {
        let n = a.len();
        let mut lu: Vec<Vec<u64>> = a
            .iter()
            .map(|row| row.iter().map(|&x| reduce_mod_p(x, p)).collect())
            .collect();
        let mut perm: Vec<usize> = (0..n).collect();

        for col in 0..n {
            let pivot_row = (col..n).find(|&r| lu[r][col] != 0)?;
            lu.swap(col, pivot_row);
            perm.swap(col, pivot_row);

            let pivot_inverse = mod_inverse(lu[col][col], p);
            for row in (col + 1)..n {
                let factor = lu[row][col] * pivot_inverse % p;
                lu[row][col] = factor;
                if factor == 0 {
                    continue;
                }
                for c in (col + 1)..n {
                    let subtracted = factor * lu[col][c] % p;
                    lu[row][c] = (lu[row][c] + p - subtracted) % p;
                }
            }
        }
        Some(ModPLu { p, lu, perm })
    }

    /// Solves `A·x = b (mod p)` using the stored factorization.
    fn solve(&self, b: &[u64]) -> Vec<u64> {
        let n = b.len();
        let p = self.p;

        // forward substitution with the unit-diagonal L
        let mut x: Vec<u64> = (0..n).map(|i| b[self.perm[i]]).collect();
        for i in 0..n {
            for j in 0..i {
                let subtracted = self.lu[i][j] * x[j] % p;
                x[i] = (x[i] + p - subtracted) % p;
            }
        }

        // back substitution with U
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let subtracted = self.lu[i][j] * x[j] % p;
                x[i] = (x[i] + p - subtracted) % p;
            }
            x[i] = x[i] * mod_inverse(self.lu[i][i], p) % p;
        }
        x
    }
}

fn reduce_mod_p(x: i64, p: u64) -> u64 {
    x.rem_euclid(p as i64) as u64
}

/// Modular inverse by Fermat, valid because p is prime.
fn mod_inverse(a: u64, p: u64) -> u64 {
    let mut base = a % p;
    let mut exponent = p - 2;
    let mut result = 1u64;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % p;
        }
        base = base * base % p;
        exponent >>= 1;
    }
    result
}
