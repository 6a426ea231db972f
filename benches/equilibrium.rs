use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use nalgebra::Vector3;

use crystnet::graph::{PeriodicEdge3D, PeriodicGraph3D};
use crystnet::solver::equilibrium_placement;

/// n x n x n supercell of the primitive cubic net.
fn grid_net(n: usize) -> PeriodicGraph3D {
    let index = |i: usize, j: usize, k: usize| i + n * j + n * n * k;
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let v = index(i, j, k);
                edges.push(PeriodicEdge3D::new(
                    v,
                    index((i + 1) % n, j, k),
                    Vector3::new(if i + 1 == n { 1 } else { 0 }, 0, 0),
                ));
                edges.push(PeriodicEdge3D::new(
                    v,
                    index(i, (j + 1) % n, k),
                    Vector3::new(0, if j + 1 == n { 1 } else { 0 }, 0),
                ));
                edges.push(PeriodicEdge3D::new(
                    v,
                    index(i, j, (k + 1) % n),
                    Vector3::new(0, 0, if k + 1 == n { 1 } else { 0 }),
                ));
            }
        }
    }
    PeriodicGraph3D::from_edges(n * n * n, edges)
}

fn bench_equilibrium(c: &mut Criterion) {
    let mut group = c.benchmark_group("equilibrium");

    for n in [2usize, 3, 4] {
        let graph = grid_net(n);
        group.bench_function(format!("pcu_supercell_{n}x{n}x{n}"), |b| {
            b.iter(|| equilibrium_placement(black_box(&graph)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(equilibrium_benches, bench_equilibrium);
criterion_main!(equilibrium_benches);
