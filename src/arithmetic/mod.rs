// Arithmetic module: Exact rational kernel for the net construction pipeline
// All exactness-critical decisions (singularity, rank, unit-cube folding) go through here

// ======================== MODULE DECLARATIONS ========================
pub mod kernel;
pub mod widen;

// Test modules
mod _tests_kernel;

// ======================== RATIONAL KERNEL ========================
pub use kernel::{
    back_to_unit,  // fn(r: &Ratio<T>) -> Ratio<T> - folds a rational into [0, 1)
    is_rank3,      // fn(cols: &[[BigRational; 3]]) -> Result<bool> - true iff three columns span Q^3
    is_singular,   // fn(cols: &[[BigRational; 3]; 3]) -> Result<bool> - exact 3x3 singularity test
    lattice_rank,  // fn(vs: &[Vector3<i64>]) -> Result<usize> - rank in {0,1,2,3} of a set of Z^3 vectors
};

// ======================== INTEGER WIDTH LADDER ========================
pub use widen::{
    demote_ratio,  // fn(r: &BigRational) -> Option<Ratio<T>> - narrows a rational to a fixed width
    RationalWidth, // trait - the i8 -> i16 -> i32 -> i64 -> i128 -> BigInt progression
};
