// CIF module: The parsed crystal record handed over by the CIF collaborator,
// plus the pure cleanup transforms run before net construction

// ======================== MODULE DECLARATIONS ========================
pub mod record;
pub mod transforms;


// ======================== PARSED RECORD ========================
pub use record::{
    CifRecord, // struct - metadata, cell, atom palette + ids, fractional positions, adjacency matrix
    MetaValue, // enum - scalar or list metadata entry
};
