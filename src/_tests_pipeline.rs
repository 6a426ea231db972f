#[cfg(test)]
mod _tests_pipeline {
    use std::collections::BTreeMap;

    use nalgebra::Vector3;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use num_traits::Zero;

    use crate::cell::Cell;
    use crate::cif::CifRecord;
    use crate::crystal::{Clusters, Crystal, ClusteringMode, CrystalFrame};
    use crate::error::Error;
    use crate::graph::{PeriodicEdge3D, PeriodicGraph3D};
    use crate::pipeline::{net_from_cif, net_from_crystal};
    use crate::symmetry::{EquivalentPosition, ReferenceIdentifiers};

    fn record(cell: Cell, atoms: &[(&str, [f64; 3])], bonds: &[(usize, usize)]) -> CifRecord {
        let mut types: Vec<String> = Vec::new();
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for (element, p) in atoms {
            let id = match types.iter().position(|t| t == element) {
                Some(id) => id,
                None => {
                    types.push((*element).to_string());
                    types.len() - 1
                }
            };
            ids.push(id);
            pos.push(Vector3::new(p[0], p[1], p[2]));
        }
        let n = atoms.len();
        let mut matrix = vec![vec![false; n]; n];
        for &(i, k) in bonds {
            matrix[i][k] = true;
            matrix[k][i] = true;
        }
        CifRecord::new(BTreeMap::new(), cell, types, ids, pos, matrix)
    }

    fn cubic10() -> Cell {
        Cell::from_parameters(10.0, 10.0, 10.0, 90.0, 90.0, 90.0)
    }

    fn q(numerator: i64, denominator: i64) -> BigRational {
        BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
    }

    #[test]
    fn two_atom_p1_record_builds_the_expected_net() {
        let rec = record(
            cubic10(),
            &[("Si", [0.0, 0.0, 0.0]), ("O", [0.5, 0.5, 0.5])],
            &[(0, 1)],
        );
        let net = net_from_cif(&rec, ClusteringMode::EachVertex).unwrap();

        assert_eq!(net.nv(), 2);
        assert_eq!(net.width_name(), "i8");
        assert!(net.position(0).iter().all(Zero::is_zero));
        assert_eq!(
            net.position(1),
            Vector3::new(q(1, 2), q(1, 2), q(1, 2))
        );
        assert_eq!(net.types(), &["Si".to_string(), "O".to_string()]);
    }

    #[test]
    fn canonical_positions_are_sorted_and_in_the_unit_cube() {
        let rec = record(
            cubic10(),
            &[("Si", [0.7, 0.2, 0.2]), ("O", [0.2, 0.7, 0.7])],
            &[(0, 1)],
        );
        let net = net_from_cif(&rec, ClusteringMode::EachVertex).unwrap();

        let positions: Vec<Vector3<BigRational>> = (0..net.nv()).map(|v| net.position(v)).collect();
        for position in &positions {
            for c in 0..3 {
                assert!(position[c] >= q(0, 1));
                assert!(position[c] < q(1, 1));
            }
        }
        for pair in positions.windows(2) {
            let a = (pair[0][0].clone(), pair[0][1].clone(), pair[0][2].clone());
            let b = (pair[1][0].clone(), pair[1][1].clone(), pair[1][2].clone());
            assert!(a <= b, "vertices are not sorted by position");
        }
    }

    #[test]
    fn empty_bond_matrix_is_an_error() {
        let rec = record(
            cubic10(),
            &[("Si", [0.0, 0.0, 0.0]), ("O", [0.5, 0.5, 0.5])],
            &[],
        );
        assert!(matches!(
            net_from_cif(&rec, ClusteringMode::EachVertex),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn two_interpenetrated_nets_are_rejected() {
        let rec = record(
            cubic10(),
            &[
                ("Si", [0.0, 0.0, 0.0]),
                ("O", [0.5, 0.5, 0.5]),
                ("Al", [0.25, 0.25, 0.25]),
                ("P", [0.75, 0.75, 0.75]),
            ],
            &[(0, 1), (2, 3)],
        );
        assert!(matches!(
            net_from_cif(&rec, ClusteringMode::EachVertex),
            Err(Error::NonCrystallineInput(_))
        ));
    }

    #[test]
    fn pendant_atoms_are_trimmed_away() {
        let rec = record(
            cubic10(),
            &[
                ("Si", [0.0, 0.0, 0.0]),
                ("O", [0.5, 0.5, 0.5]),
                ("H", [0.25, 0.0, 0.0]),
            ],
            &[(0, 1), (0, 2)],
        );
        let net = net_from_cif(&rec, ClusteringMode::EachVertex).unwrap();
        assert_eq!(net.nv(), 2);
        assert!(!net.types().contains(&"H".to_string()));
    }

    #[test]
    fn symmetry_images_merge_onto_special_positions() {
        // the body-centring translation maps each atom onto the other, so
        // the expanded record is the input record again
        let translation = EquivalentPosition::parse(
            "x+1/2, y+1/2, z+1/2",
            &ReferenceIdentifiers::default(),
        )
        .unwrap();
        let cell = cubic10().with_equivalents(vec![translation]);
        let rec = record(
            cell,
            &[("Si", [0.0, 0.0, 0.0]), ("O", [0.5, 0.5, 0.5])],
            &[(0, 1)],
        );
        let net = net_from_cif(&rec, ClusteringMode::EachVertex).unwrap();
        assert_eq!(net.nv(), 2);
        assert_eq!(net.position(1), Vector3::new(q(1, 2), q(1, 2), q(1, 2)));
    }

    #[test]
    fn input_clustering_without_clusters_fails() {
        let rec = record(
            cubic10(),
            &[("Si", [0.0, 0.0, 0.0]), ("O", [0.5, 0.5, 0.5])],
            &[(0, 1)],
        );
        assert!(matches!(
            net_from_cif(&rec, ClusteringMode::Input),
            Err(Error::MissingClusters)
        ));
    }

    fn two_vertex_frame(first: &str, second: &str) -> CrystalFrame {
        let mut edges = Vec::new();
        for ox in -1..=0 {
            for oy in -1..=0 {
                for oz in -1..=0 {
                    edges.push(PeriodicEdge3D::new(0, 1, Vector3::new(ox, oy, oz)));
                }
            }
        }
        CrystalFrame {
            cell: cubic10(),
            types: vec![first.into(), second.into()],
            pos: vec![Vector3::zeros(), Vector3::new(0.5, 0.5, 0.5)],
            graph: PeriodicGraph3D::from_edges(2, edges),
        }
    }

    #[test]
    fn mof_clustering_keeps_distinct_building_units() {
        let crystal = Crystal::without_clusters(two_vertex_frame("Zn", "C"));
        let net = net_from_crystal(&crystal, ClusteringMode::Mof).unwrap();
        assert_eq!(net.nv(), 2);
    }

    #[test]
    fn mof_clustering_fails_on_a_single_unit() {
        // everything is one organic component, so one cluster
        let crystal = Crystal::without_clusters(two_vertex_frame("C", "C"));
        assert!(matches!(
            net_from_crystal(&crystal, ClusteringMode::Mof),
            Err(Error::MissingAtomInformation(_))
        ));
    }

    #[test]
    fn guess_clustering_downgrades_to_each_vertex() {
        let crystal = Crystal::without_clusters(two_vertex_frame("C", "C"));
        let net = net_from_crystal(&crystal, ClusteringMode::Guess).unwrap();
        assert_eq!(net.nv(), 2);
    }

    #[test]
    fn auto_clustering_prefers_input_clusters() {
        let frame = two_vertex_frame("Zn", "C");
        let clusters = Clusters::identity(2);
        let crystal = Crystal::with_clusters(frame.clone(), clusters);
        let net = net_from_crystal(&crystal, ClusteringMode::Auto).unwrap();
        assert_eq!(net.nv(), 2);

        let bare = Crystal::without_clusters(frame);
        let net = net_from_crystal(&bare, ClusteringMode::Auto).unwrap();
        assert_eq!(net.nv(), 2);
    }

    #[test]
    fn barycentric_invariant_holds_end_to_end() {
        let rec = record(
            cubic10(),
            &[("Si", [0.1, 0.2, 0.3]), ("O", [0.6, 0.7, 0.8])],
            &[(0, 1)],
        );
        let net = net_from_cif(&rec, ClusteringMode::EachVertex).unwrap();
        let graph = net.graph();
        for i in 0..net.nv() {
            for c in 0..3 {
                let mut rhs = BigRational::zero();
                for neighbor in graph.neighbors(i) {
                    rhs += net.position(neighbor.vertex)[c].clone()
                        + BigRational::from_integer(BigInt::from(neighbor.offset[c]));
                }
                let lhs = BigRational::from_integer(BigInt::from(graph.degree(i) as i64))
                    * net.position(i)[c].clone();
                assert_eq!(lhs, rhs);
            }
        }
    }
}
