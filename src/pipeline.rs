//! End-to-end net construction: parsed CIF record → canonical crystal net.

use crate::cif::CifRecord;
use crate::crystal::{coalesce_sbus, find_sbus, Crystal, CrystalFrame, ClusteringMode};
use crate::error::{Error, Result};
use crate::graph::{dimensionality, trim_topology, PeriodicGraph3D};
use crate::net::AnyCrystalNet;
use crate::solver::equilibrium_placement;
use crate::warnings::issue_warning;

/// Builds the canonical net of a parsed CIF record.
///
/// Cleanup (partial-occupancy dedup, symmetry expansion, collision
/// pruning) runs first, then the bonds are resolved into periodic edges
/// and the crystal is handed to the clustering dispatch.
pub fn net_from_cif(record: &CifRecord, mode: ClusteringMode) -> Result<AnyCrystalNet> {
    if !record.has_bonds() {
        return Err(Error::EmptyGraph);
    }
    let cleaned = record.remove_partial_occupancy().expand_symmetry();
    let crystal = Crystal::from_cif(&cleaned)?;
    net_from_crystal(&crystal, mode)
}

/// The clustering dispatch: decides what the vertices of the net are.
pub fn net_from_crystal(crystal: &Crystal, mode: ClusteringMode) -> Result<AnyCrystalNet> {
    match mode {
        ClusteringMode::EachVertex => net_from_frame(crystal.frame()),
        ClusteringMode::Input => match crystal.clusters() {
            None => Err(Error::MissingClusters),
            Some(clusters) => net_from_frame(&coalesce_sbus(crystal.frame(), clusters)),
        },
        ClusteringMode::Mof => {
            let clusters = find_sbus(crystal.frame())?;
            if clusters.len() <= 1 {
                return Err(Error::MissingAtomInformation(
                    "the SBU heuristic collapsed the crystal into a single cluster".into(),
                ));
            }
            net_from_frame(&coalesce_sbus(crystal.frame(), &clusters))
        }
        ClusteringMode::Guess => match net_from_crystal(crystal, ClusteringMode::Mof) {
            Ok(net) if net.nv() > 1 => Ok(net),
            Ok(_) | Err(Error::MissingAtomInformation(_)) => {
                net_from_crystal(crystal, ClusteringMode::EachVertex)
            }
            Err(other) => Err(other),
        },
        ClusteringMode::Auto => {
            if crystal.clusters().is_some() {
                net_from_crystal(crystal, ClusteringMode::Input)
            } else {
                net_from_crystal(crystal, ClusteringMode::Guess)
            }
        }
    }
}

/// Net construction on a cluster-free crystal: dimensionality filtering,
/// topological reduction, exact equilibrium, canonicalization.
pub fn net_from_frame(frame: &CrystalFrame) -> Result<AnyCrystalNet> {
    // 1) the net must be exactly one 3-periodic component
    let ranks = dimensionality(&frame.graph)?;
    match ranks.get(&3).map_or(0, Vec::len) {
        0 => {
            return Err(Error::NonCrystallineInput(
                "no 3-periodic component in the bond graph".into(),
            ))
        }
        1 => {}
        many => {
            return Err(Error::NonCrystallineInput(format!(
                "{many} disjoint 3-periodic components"
            )))
        }
    }

    let mut graph = frame.graph.clone();
    let mut vmap: Vec<usize> = (0..graph.nv()).collect();

    // 2) strip 0-periodic components, then any lower-periodic leftovers
    let rank0: Vec<usize> = ranks
        .get(&0)
        .into_iter()
        .flatten()
        .flatten()
        .copied()
        .collect();
    if !rank0.is_empty() {
        issue_warning!("ignoring {} atom(s) in non-periodic residues", rank0.len());
        strip(&mut graph, &mut vmap, &rank0);
    }
    let lower: Vec<usize> = [1usize, 2]
        .iter()
        .filter_map(|rank| ranks.get(rank))
        .flatten()
        .flatten()
        .copied()
        .collect();
    if !lower.is_empty() {
        issue_warning!(
            "ignoring {} atom(s) in 1- or 2-periodic subnets",
            lower.len()
        );
        strip(&mut graph, &mut vmap, &lower);
    }

    // 3) degree-based reduction to the topological skeleton
    let (graph, trim_map) = trim_topology(graph);
    let vmap: Vec<usize> = trim_map.into_iter().map(|v| vmap[v]).collect();

    // 4) exact barycentric placement
    let placement = equilibrium_placement(&graph)?;

    // 5) canonical form over the narrowest width
    let types: Vec<String> = vmap.iter().map(|&v| frame.types[v].clone()).collect();
    AnyCrystalNet::from_placement(frame.cell.clone(), types, graph, &placement)
}

/// Removes the listed vertices (given in original labels) and keeps the
/// original-label map up to date.
fn strip(graph: &mut PeriodicGraph3D, vmap: &mut Vec<usize>, original_targets: &[usize]) {
    let current_targets: Vec<usize> = original_targets
        .iter()
        .filter_map(|&original| vmap.binary_search(&original).ok())
        .collect();
    let kept = graph.rem_vertices(&current_targets);
    *vmap = kept.into_iter().map(|v| vmap[v]).collect();
}
