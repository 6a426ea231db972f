use std::collections::BTreeMap;
use std::collections::VecDeque;

use nalgebra::Vector3;

use crate::arithmetic::lattice_rank;
use crate::error::Result;
use crate::graph::periodic::PeriodicGraph3D;

/// Periodicity analysis: groups the vertices into connected components and
/// reports, for each rank r ∈ {0, 1, 2, 3}, the components whose offsets
/// span a rank-r sublattice of ℤ³ when the component is unrolled.
///
/// A component's translations are collected by a BFS that assigns every
/// vertex a placement in ℤ³; each non-tree half-edge `(u, v, o)` then
/// witnesses the translation `placement[u] + o − placement[v]`.
pub fn dimensionality(graph: &PeriodicGraph3D) -> Result<BTreeMap<usize, Vec<Vec<usize>>>> {
    let n = graph.nv();
    let mut placement: Vec<Option<Vector3<i64>>> = vec![None; n];
    let mut result: BTreeMap<usize, Vec<Vec<usize>>> = BTreeMap::new();

    for root in 0..n {
        if placement[root].is_some() {
            continue;
        }
        placement[root] = Some(Vector3::zeros());

        let mut component = vec![root];
        let mut translations: Vec<Vector3<i64>> = Vec::new();
        let mut queue = VecDeque::from([root]);

        while let Some(u) = queue.pop_front() {
            let here = placement[u].expect("queued vertices are placed");
            for neighbor in graph.neighbors(u) {
                let there = here + neighbor.offset.map(i64::from);
                match placement[neighbor.vertex] {
                    None => {
                        placement[neighbor.vertex] = Some(there);
                        component.push(neighbor.vertex);
                        queue.push_back(neighbor.vertex);
                    }
                    Some(known) => {
                        let translation = there - known;
                        if translation != Vector3::zeros() {
                            translations.push(translation);
                        }
                    }
                }
            }
        }

        let rank = lattice_rank(&translations)?;
        component.sort_unstable();
        result.entry(rank).or_default().push(component);
    }

    Ok(result)
}
