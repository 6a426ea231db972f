// Crystal module: Atomic crystals between CIF cleanup and net construction
// Holds the periodic bond graph, the optional SBU clustering, and the
// minimum-image edge builder

// ======================== MODULE DECLARATIONS ========================
pub mod clustering;
pub mod edges;
pub mod sbus;
pub mod types;

// Test modules
mod _tests_edges;

// ======================== CRYSTAL TYPES ========================
pub use types::{
    Crystal,      // enum - WithClusters / WithoutClusters over a shared frame
    CrystalFrame, // struct - cell, element symbols, fractional positions, periodic graph
};

// ======================== CLUSTERING ========================
pub use clustering::{
    Clusters,       // struct - partition of atoms into SBUs with per-member lattice offsets
    ClusteringMode, // enum - Input, EachVertex, Mof, Guess, Auto
};
pub use sbus::{
    coalesce_sbus, // fn(frame, clusters) -> CrystalFrame - contracts each cluster to a super-vertex
    find_sbus,     // fn(frame) -> Result<Clusters> - metal-seeded SBU detection
};

// ======================== PERIODIC EDGE BUILDER ========================
pub use edges::edges_from_bonds; // fn(bonds, mat, pos) -> Result<Vec<PeriodicEdge3D>> - minimum-image offsets
