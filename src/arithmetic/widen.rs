use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::{BigRational, Ratio};
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Signed, ToPrimitive};

/// Integer types usable as the numerator/denominator of an exact rational.
///
/// The implementors form the fixed widening progression
/// i8 → i16 → i32 → i64 → i128 → [`BigInt`]. Arithmetic at a fixed width
/// uses the checked operations and reports overflow by returning `None`,
/// at which point the caller retries one rung wider; `BigInt` never
/// overflows.
pub trait RationalWidth:
    Integer
    + Clone
    + Signed
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + CheckedDiv
    + fmt::Debug
    + fmt::Display
    + 'static
{
    /// Attempt to represent an arbitrary-precision integer at this width.
    fn from_bigint(value: &BigInt) -> Option<Self>;

    /// Promote to arbitrary precision.
    fn to_bigint(&self) -> BigInt;
}

macro_rules! impl_rational_width {
    ($($ty:ty => $to:ident),* $(,)?) => {$(
        impl RationalWidth for $ty {
            fn from_bigint(value: &BigInt) -> Option<Self> {
                value.$to()
            }

            fn to_bigint(&self) -> BigInt {
                BigInt::from(*self)
            }
        }
    )*};
}

impl_rational_width!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
);

impl RationalWidth for BigInt {
    fn from_bigint(value: &BigInt) -> Option<Self> {
        Some(value.clone())
    }

    fn to_bigint(&self) -> BigInt {
        self.clone()
    }
}

/// Narrow an arbitrary-precision rational to width `T`.
///
/// Returns `None` when either the numerator or the denominator does not
/// fit. The input is already in lowest terms with a positive denominator,
/// so the narrowed value is rebuilt without re-reduction.
pub fn demote_ratio<T: RationalWidth>(r: &BigRational) -> Option<Ratio<T>> {
    Some(Ratio::new_raw(
        T::from_bigint(r.numer())?,
        T::from_bigint(r.denom())?,
    ))
}
