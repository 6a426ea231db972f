use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// How atoms are grouped into the vertices of the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusteringMode {
    /// Use the clusters carried by the input; fail without them.
    Input,
    /// Every atom is its own vertex.
    EachVertex,
    /// Run the SBU heuristic; fail when it collapses to one cluster.
    Mof,
    /// Try [`ClusteringMode::Mof`], falling back to
    /// [`ClusteringMode::EachVertex`] when it cannot tell atoms apart.
    Guess,
    /// Input clusters when present, otherwise [`ClusteringMode::Guess`].
    Auto,
}

/// A partition of the atoms into SBUs.
///
/// `attributions[v]` names the cluster of atom `v` and `offsets[v]` the
/// lattice shift that moves `v` into the canonical instance of that
/// cluster; `clusters[c]` lists the members of cluster `c` as
/// (atom, shift) pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clusters {
    pub attributions: Vec<usize>,
    pub offsets: Vec<Vector3<i32>>,
    pub clusters: Vec<Vec<(usize, Vector3<i32>)>>,
}

impl Clusters {
    /// The identity clustering: every atom its own cluster, zero offsets.
    pub fn identity(n: usize) -> Self {
        Clusters {
            attributions: (0..n).collect(),
            offsets: vec![Vector3::zeros(); n],
            clusters: (0..n).map(|v| vec![(v, Vector3::zeros())]).collect(),
        }
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Whether this is the identity clustering, tested as
    /// `attributions[v] == v` for every atom.
    pub fn is_trivial(&self) -> bool {
        self.attributions.iter().enumerate().all(|(v, &c)| v == c)
    }
}
