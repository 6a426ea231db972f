use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// A metadata entry: CIF data items are scalars, loop columns are lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Scalar(String),
    List(Vec<String>),
}

/// A parsed CIF record, the input of the pipeline.
///
/// `ids[i]` indexes the element palette `types`; positions are fractional
/// with components in `[0, 1)`; `bonds` is symmetric with a zero diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CifRecord {
    pub metadata: BTreeMap<String, MetaValue>,
    pub cell: Cell,
    pub types: Vec<String>,
    pub ids: Vec<usize>,
    pub pos: Vec<Vector3<f64>>,
    pub bonds: Vec<Vec<bool>>,
}

impl CifRecord {
    /// Assembles a record, folding positions into the unit cube and
    /// checking the structural invariants of the input contract.
    pub fn new(
        metadata: BTreeMap<String, MetaValue>,
        cell: Cell,
        types: Vec<String>,
        ids: Vec<usize>,
        pos: Vec<Vector3<f64>>,
        bonds: Vec<Vec<bool>>,
    ) -> Self {
        let n = ids.len();
        assert_eq!(pos.len(), n, "one position per atom site");
        assert!(ids.iter().all(|&id| id < types.len()), "atom id outside the palette");
        assert_eq!(bonds.len(), n, "adjacency matrix must be {n}x{n}");
        for (i, row) in bonds.iter().enumerate() {
            assert_eq!(row.len(), n, "adjacency matrix must be {n}x{n}");
            assert!(!row[i], "adjacency diagonal must be zero");
        }
        for i in 0..n {
            for k in (i + 1)..n {
                assert_eq!(bonds[i][k], bonds[k][i], "adjacency matrix must be symmetric");
            }
        }

        let pos = pos
            .into_iter()
            .map(|p| p.map(|x| x - x.floor()))
            .collect();

        CifRecord {
            metadata,
            cell,
            types,
            ids,
            pos,
            bonds,
        }
    }

    /// Number of atom sites.
    pub fn natoms(&self) -> usize {
        self.ids.len()
    }

    /// Element symbol of an atom site.
    pub fn element(&self, site: usize) -> &str {
        &self.types[self.ids[site]]
    }

    /// Whether the adjacency matrix contains at least one bond.
    pub fn has_bonds(&self) -> bool {
        self.bonds.iter().any(|row| row.iter().any(|&b| b))
    }
}
