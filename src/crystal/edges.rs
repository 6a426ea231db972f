use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};
use crate::graph::PeriodicEdge3D;

/// Distance slack (Å) under which two candidate offsets count as tied.
const TIE_TOLERANCE: f64 = 1e-3;

/// Resolves each bond of the adjacency matrix into one or more periodic
/// edges carrying minimum-image lattice offsets.
///
/// For a bonded pair i < k the 27 offsets of {−1, 0, 1}³ are scanned in
/// lexicographic order, seeded with the cell diagonal ‖mat·(1,1,1)‖. A
/// strictly closer candidate resets the retained set; a candidate within
/// the tie tolerance is appended, and the running minimum drifts to the
/// mean of itself and the candidate, which keeps chains of almost-equal
/// distances together.
pub fn edges_from_bonds(
    bonds: &[Vec<bool>],
    mat: &Matrix3<f64>,
    pos: &[Vector3<f64>],
) -> Result<Vec<PeriodicEdge3D>> {
    let n = pos.len();
    let seed = (mat * Vector3::new(1.0, 1.0, 1.0)).norm();

    let mut edges = Vec::new();
    for i in 0..n {
        for k in (i + 1)..n {
            if !bonds[i][k] {
                continue;
            }
            let mut minimum = seed;
            let mut retained: Vec<Vector3<i32>> = Vec::new();
            for ox in -1..=1 {
                for oy in -1..=1 {
                    for oz in -1..=1 {
                        let offset = Vector3::new(ox, oy, oz);
                        let distance =
                            (mat * (pos[k] - pos[i] + offset.map(f64::from))).norm();
                        if distance < minimum - TIE_TOLERANCE {
                            retained.clear();
                            retained.push(offset);
                            minimum = distance;
                        } else if (distance - minimum).abs() < TIE_TOLERANCE {
                            minimum = (minimum + distance) / 2.0;
                            retained.push(offset);
                        }
                    }
                }
            }
            for offset in retained {
                edges.push(PeriodicEdge3D::new(i, k, offset));
            }
        }
    }

    if edges.is_empty() {
        return Err(Error::EmptyGraph);
    }
    Ok(edges)
}
