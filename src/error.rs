//! Error types for the net construction pipeline.

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort the construction of a crystal net.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// An ill-formed symmetry operator string.
    #[error("could not parse symmetry operator {input:?}: {reason}")]
    SymmetryParseError { input: String, reason: String },

    /// The requested clustering mode cannot proceed on this input.
    #[error("missing atom information: {0}")]
    MissingAtomInformation(String),

    /// Input clustering was requested but the crystal carries no clusters.
    #[error("input clustering requested but the crystal has no clusters")]
    MissingClusters,

    /// The bond graph does not reduce to exactly one 3-periodic component.
    #[error("non-crystalline input: {0}")]
    NonCrystallineInput(String),

    /// The adjacency matrix contains no bond at all.
    #[error("the bond matrix is empty, no net can be built")]
    EmptyGraph,

    /// Exact arithmetic exceeded arbitrary-precision resources.
    #[error("exact solver overflow: {0}")]
    SolverOverflow(String),
}
