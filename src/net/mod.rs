// Net module: The canonical form of a crystallographic net
// Positions are exact rationals in [0,1)^3, sorted, over the narrowest
// integer width that can hold the equilibrium placement

// ======================== MODULE DECLARATIONS ========================
pub mod crystal_net;


// ======================== CRYSTAL NETS ========================
pub use crystal_net::{
    AnyCrystalNet, // enum - width-tagged net (I8 through I128, then Big)
    CrystalNet,    // struct - cell, element symbols, rational positions, periodic graph
};
