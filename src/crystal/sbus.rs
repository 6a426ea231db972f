use std::collections::{BTreeSet, VecDeque};

use nalgebra::Vector3;

use crate::crystal::clustering::Clusters;
use crate::crystal::types::CrystalFrame;
use crate::elements::{bridges_to_metal, is_metal};
use crate::error::{Error, Result};
use crate::graph::{PeriodicEdge3D, PeriodicGraph3D};

/// Groups the atoms of a crystal into secondary building units.
///
/// Atoms split into an inorganic class (metals, plus O/N/S/P/halogens
/// directly bonded to a metal) and an organic remainder; each class is
/// partitioned into the connected components of its induced subgraph,
/// with member offsets tracked through the periodic edges. A component
/// whose unrolling assigns two different lattice shifts to one atom wraps
/// a full period and cannot act as a building unit.
pub fn find_sbus(frame: &CrystalFrame) -> Result<Clusters> {
    let n = frame.types.len();

    let metal: Vec<bool> = frame.types.iter().map(|t| is_metal(t)).collect();
    let mut inorganic = metal.clone();
    for v in 0..n {
        if !metal[v] && bridges_to_metal(&frame.types[v]) {
            inorganic[v] = frame.graph.neighbors(v).iter().any(|nb| metal[nb.vertex]);
        }
    }

    let mut attributions = vec![usize::MAX; n];
    let mut offsets = vec![Vector3::zeros(); n];
    let mut clusters: Vec<Vec<(usize, Vector3<i32>)>> = Vec::new();

    for root in 0..n {
        if attributions[root] != usize::MAX {
            continue;
        }
        let cluster_index = clusters.len();
        let mut members = Vec::new();

        attributions[root] = cluster_index;
        offsets[root] = Vector3::zeros();
        members.push((root, Vector3::zeros()));

        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for neighbor in frame.graph.neighbors(u) {
                let v = neighbor.vertex;
                if inorganic[v] != inorganic[root] {
                    continue;
                }
                // v joins the canonical instance through u
                let shift = offsets[u] + neighbor.offset;
                if attributions[v] == usize::MAX {
                    attributions[v] = cluster_index;
                    offsets[v] = shift;
                    members.push((v, shift));
                    queue.push_back(v);
                } else if attributions[v] == cluster_index && offsets[v] != shift {
                    return Err(Error::MissingAtomInformation(format!(
                        "building unit around atom {root} wraps a full period of the crystal"
                    )));
                }
            }
        }
        clusters.push(members);
    }

    Ok(Clusters {
        attributions,
        offsets,
        clusters,
    })
}

/// Contracts every cluster to a single super-vertex.
///
/// The super-vertex sits at the centroid of its member images, folded back
/// into the unit cube; an atom-level edge (u, v, o) becomes the cluster
/// edge (cu, cv, o + s_u − s_v) and is dropped when it stays inside one
/// cluster instance. Parallel atom-level bonds between the same pair of
/// cluster instances merge into one edge.
pub fn coalesce_sbus(frame: &CrystalFrame, clusters: &Clusters) -> CrystalFrame {
    let ncl = clusters.len();

    let mut pos = Vec::with_capacity(ncl);
    let mut folds = Vec::with_capacity(ncl);
    let mut types = Vec::with_capacity(ncl);
    for members in &clusters.clusters {
        let mut centroid = Vector3::zeros();
        for (v, shift) in members {
            centroid += frame.pos[*v] + shift.map(f64::from);
        }
        centroid /= members.len() as f64;

        let fold = centroid.map(|x| x.floor() as i32);
        folds.push(fold);
        pos.push(centroid - fold.map(f64::from));

        let representative = members
            .iter()
            .map(|(v, _)| *v)
            .find(|&v| is_metal(&frame.types[v]))
            .unwrap_or(members[0].0);
        types.push(frame.types[representative].clone());
    }

    let mut cluster_edges: BTreeSet<(usize, usize, [i32; 3])> = BTreeSet::new();
    for edge in frame.graph.edges() {
        let (cu, cv) = (
            clusters.attributions[edge.src],
            clusters.attributions[edge.dst],
        );
        let offset = edge.offset + clusters.offsets[edge.src] - clusters.offsets[edge.dst];
        // compensate the fold applied to each centroid
        let offset = offset + folds[cv] - folds[cu];
        if cu == cv && offset == Vector3::zeros() {
            continue;
        }
        cluster_edges.insert(canonical_edge(cu, cv, offset));
    }

    let graph = PeriodicGraph3D::from_edges(
        ncl,
        cluster_edges
            .into_iter()
            .map(|(u, v, o)| PeriodicEdge3D::new(u, v, Vector3::new(o[0], o[1], o[2]))),
    );

    CrystalFrame {
        cell: frame.cell.clone(),
        types,
        pos,
        graph,
    }
}

fn canonical_edge(u: usize, v: usize, offset: Vector3<i32>) -> (usize, usize, [i32; 3]) {
    if v < u || (u == v && [offset.x, offset.y, offset.z] < [0, 0, 0]) {
        (v, u, [-offset.x, -offset.y, -offset.z])
    } else {
        (u, v, [offset.x, offset.y, offset.z])
    }
}
