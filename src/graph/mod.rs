// Graph module: 3-periodic multigraphs and their topological reduction
// Vertices are plain indices; edges carry integer lattice offsets in Z^3

// ======================== MODULE DECLARATIONS ========================
pub mod dimensionality;
pub mod periodic;
pub mod trim;


// ======================== PERIODIC MULTIGRAPH ========================
pub use periodic::{
    Neighbor,        // struct - neighbor descriptor (vertex, offset)
    PeriodicEdge3D,  // struct - (src, dst, offset) with the mirror (dst, src, -offset) implicit
    PeriodicGraph3D, // struct - multigraph with explicit mirror half-edges and graph surgery
};

// ======================== TOPOLOGICAL REDUCTION ========================
pub use dimensionality::dimensionality; // fn(graph) -> Result<BTreeMap<rank, components>> - periodicity rank per component
pub use trim::trim_topology;            // fn(graph) -> (reduced, vmap) - degree-<=1 pruning and degree-2 contraction
