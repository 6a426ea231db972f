use nalgebra::Vector3;

use crate::graph::periodic::{PeriodicEdge3D, PeriodicGraph3D};

/// Reduces a periodic graph to its topological skeleton.
///
/// Alternates two passes until neither applies: removal of every vertex of
/// degree ≤ 1, and splicing of degree-2 vertices, replacing the neighbor
/// descriptors (v₁, o₁), (v₂, o₂) with the single edge (v₁, v₂, o₂ − o₁).
/// A splice that would create a zero-offset self-loop is skipped, as is a
/// vertex whose two half-edges form its own self-loop. Multi-edges and
/// (offset-carrying) self-loops are legitimate results.
///
/// Returns the reduced graph together with the injective `vmap` from
/// reduced indices to the indices of the input graph.
pub fn trim_topology(graph: PeriodicGraph3D) -> (PeriodicGraph3D, Vec<usize>) {
    let mut graph = graph;
    let mut vmap: Vec<usize> = (0..graph.nv()).collect();

    loop {
        // pass 1: strip leaves and isolated vertices
        let low: Vec<usize> = (0..graph.nv()).filter(|&v| graph.degree(v) <= 1).collect();
        if !low.is_empty() {
            let kept = graph.rem_vertices(&low);
            vmap = kept.into_iter().map(|k| vmap[k]).collect();
            continue;
        }

        // pass 2: splice one degree-2 vertex, then re-examine degrees
        let Some((v, edge)) = find_splice(&graph) else {
            break;
        };
        graph.add_edge(edge);
        let kept = graph.rem_vertices(&[v]);
        vmap = kept.into_iter().map(|k| vmap[k]).collect();
    }

    (graph, vmap)
}

fn find_splice(graph: &PeriodicGraph3D) -> Option<(usize, PeriodicEdge3D)> {
    for v in 0..graph.nv() {
        if graph.degree(v) != 2 {
            continue;
        }
        let [n1, n2] = graph.neighbors(v) else {
            unreachable!("degree was just checked")
        };
        // both half-edges of a self-loop: an isolated periodic cycle
        if n1.vertex == v || n2.vertex == v {
            continue;
        }
        let offset = n2.offset - n1.offset;
        if n1.vertex == n2.vertex && offset == Vector3::zeros() {
            // splicing would create a forbidden zero-offset self-loop
            continue;
        }
        return Some((v, PeriodicEdge3D::new(n1.vertex, n2.vertex, offset)));
    }
    None
}
