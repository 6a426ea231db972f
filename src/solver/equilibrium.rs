use nalgebra::Vector3;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::Result;
use crate::graph::PeriodicGraph3D;
use crate::solver::dixon::dixon_solve;

/// Computes the exact barycentric placement of a connected periodic graph.
///
/// Every vertex ends up at the mean of its periodic neighbours:
/// `deg(i) · X[i] = Σ (X[j] + o)` over the neighbour descriptors `(j, o)`
/// of `i`, exactly over ℚ. The system has a one-dimensional null space
/// (any constant shift), resolved by anchoring vertex 0 at the origin and
/// solving the reduced system on the remaining vertices.
///
/// Self-loops drop out of the system: their two half-edges contribute the
/// vertex itself on both sides with cancelling offsets.
pub fn equilibrium_placement(graph: &PeriodicGraph3D) -> Result<Vec<Vector3<BigRational>>> {
    let n = graph.nv();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        return Ok(vec![origin()]);
    }

    // reduced Laplacian-like system on vertices 1..n:
    //   A[i][i] = -deg(i) excluding self-loops, A[i][j] = neighbour count,
    //   Y[i]    = -Σ offsets of the edges leaving i
    let mut a = vec![vec![0i64; n - 1]; n - 1];
    let mut y = vec![vec![0i64; 3]; n - 1];
    for i in 1..n {
        for neighbor in graph.neighbors(i) {
            if neighbor.vertex == i {
                continue;
            }
            a[i - 1][i - 1] -= 1;
            if neighbor.vertex != 0 {
                a[i - 1][neighbor.vertex - 1] += 1;
            }
            for c in 0..3 {
                y[i - 1][c] -= i64::from(neighbor.offset[c]);
            }
        }
    }

    let reduced = dixon_solve(&a, &y)?;

    let mut placement = Vec::with_capacity(n);
    placement.push(origin());
    for row in reduced {
        placement.push(Vector3::new(row[0].clone(), row[1].clone(), row[2].clone()));
    }
    Ok(placement)
}

fn origin() -> Vector3<BigRational> {
    Vector3::new(BigRational::zero(), BigRational::zero(), BigRational::zero())
}
