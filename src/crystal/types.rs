use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::cif::CifRecord;
use crate::crystal::clustering::Clusters;
use crate::crystal::edges::edges_from_bonds;
use crate::error::Result;
use crate::graph::PeriodicGraph3D;

/// The parts every crystal carries: cell, per-atom element symbols,
/// fractional positions and the periodic bond graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalFrame {
    pub cell: Cell,
    pub types: Vec<String>,
    pub pos: Vec<Vector3<f64>>,
    pub graph: PeriodicGraph3D,
}

/// A crystal, with or without an atom-to-SBU attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Crystal {
    WithClusters {
        frame: CrystalFrame,
        clusters: Clusters,
    },
    WithoutClusters {
        frame: CrystalFrame,
    },
}

impl Crystal {
    pub fn without_clusters(frame: CrystalFrame) -> Self {
        Crystal::WithoutClusters { frame }
    }

    pub fn with_clusters(frame: CrystalFrame, clusters: Clusters) -> Self {
        Crystal::WithClusters { frame, clusters }
    }

    /// Builds a cluster-free crystal from a cleaned-up CIF record by
    /// resolving the minimum-image offset of every bond.
    pub fn from_cif(record: &CifRecord) -> Result<Self> {
        let edges = edges_from_bonds(&record.bonds, &record.cell.mat, &record.pos)?;
        let graph = PeriodicGraph3D::from_edges(record.natoms(), edges);
        let types = (0..record.natoms())
            .map(|site| record.element(site).to_string())
            .collect();
        Ok(Crystal::WithoutClusters {
            frame: CrystalFrame {
                cell: record.cell.clone(),
                types,
                pos: record.pos.clone(),
                graph,
            },
        })
    }

    pub fn frame(&self) -> &CrystalFrame {
        match self {
            Crystal::WithClusters { frame, .. } => frame,
            Crystal::WithoutClusters { frame } => frame,
        }
    }

    pub fn clusters(&self) -> Option<&Clusters> {
        match self {
            Crystal::WithClusters { clusters, .. } => Some(clusters),
            Crystal::WithoutClusters { .. } => None,
        }
    }
}
