// Solver module: Exact equilibrium placement of periodic graphs
// The reduced Laplacian system is solved over Z with Dixon p-adic lifting,
// giving every vertex the exact rational barycentre of its neighbours

// ======================== MODULE DECLARATIONS ========================
pub mod dixon;
pub mod equilibrium;

// Test modules
mod _tests_dixon;

// ======================== EXACT LINEAR SOLVER ========================
pub use dixon::dixon_solve; // fn(a, y) -> Result<Vec<Vec<BigRational>>> - exact solution of an integer system

// ======================== EQUILIBRIUM PLACEMENT ========================
pub use equilibrium::equilibrium_placement; // fn(graph) -> Result<Vec<Vector3<BigRational>>> - barycentric embedding
