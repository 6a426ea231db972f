#[cfg(test)]
mod _tests_edges {
    use nalgebra::{Matrix3, Vector3};

    use crate::crystal::edges::edges_from_bonds;
    use crate::error::Error;

    fn bonds_of(n: usize, pairs: &[(usize, usize)]) -> Vec<Vec<bool>> {
        let mut bonds = vec![vec![false; n]; n];
        for &(i, k) in pairs {
            bonds[i][k] = true;
            bonds[k][i] = true;
        }
        bonds
    }

    #[test]
    fn body_diagonal_bond_ties_all_eight_images() {
        // every offset in {-1,0}³ leaves each component at ±0.5, so all
        // eight images are exactly equidistant and all are retained
        let mat = Matrix3::identity() * 10.0;
        let pos = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5)];
        let edges = edges_from_bonds(&bonds_of(2, &[(0, 1)]), &mat, &pos).unwrap();
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().all(|e| e.src == 0 && e.dst == 1));
        let offsets: Vec<Vector3<i32>> = edges.iter().map(|e| e.offset).collect();
        for ox in -1..=0 {
            for oy in -1..=0 {
                for oz in -1..=0 {
                    assert!(offsets.contains(&Vector3::new(ox, oy, oz)));
                }
            }
        }
    }

    #[test]
    fn short_in_cell_bond_keeps_the_zero_offset() {
        let mat = Matrix3::identity() * 10.0;
        let pos = vec![Vector3::new(0.1, 0.1, 0.1), Vector3::new(0.4, 0.3, 0.2)];
        let edges = edges_from_bonds(&bonds_of(2, &[(0, 1)]), &mat, &pos).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].src, 0);
        assert_eq!(edges[0].dst, 1);
        assert_eq!(edges[0].offset, Vector3::zeros());
    }

    #[test]
    fn bond_across_the_boundary_gets_a_unit_offset() {
        let mat = Matrix3::identity() * 10.0;
        let pos = vec![Vector3::new(0.9, 0.0, 0.0), Vector3::new(0.1, 0.0, 0.0)];
        let edges = edges_from_bonds(&bonds_of(2, &[(0, 1)]), &mat, &pos).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].offset, Vector3::new(1, 0, 0));
    }

    #[test]
    fn equidistant_images_are_all_retained() {
        // at half-cell separation the 0 and -1 offsets tie exactly
        let mat = Matrix3::identity() * 10.0;
        let pos = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.0, 0.0)];
        let edges = edges_from_bonds(&bonds_of(2, &[(0, 1)]), &mat, &pos).unwrap();
        let offsets: Vec<Vector3<i32>> = edges.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![Vector3::new(-1, 0, 0), Vector3::new(0, 0, 0)]);
    }

    #[test]
    fn empty_bond_matrix_is_rejected() {
        let mat = Matrix3::identity() * 10.0;
        let pos = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5)];
        let result = edges_from_bonds(&bonds_of(2, &[]), &mat, &pos);
        assert!(matches!(result, Err(Error::EmptyGraph)));
    }

    #[test]
    fn every_bonded_pair_yields_an_edge() {
        let mat = Matrix3::identity() * 12.0;
        let pos = vec![
            Vector3::new(0.1, 0.1, 0.1),
            Vector3::new(0.4, 0.1, 0.1),
            Vector3::new(0.4, 0.4, 0.1),
        ];
        let edges = edges_from_bonds(&bonds_of(3, &[(0, 1), (1, 2), (0, 2)]), &mat, &pos).unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| e.offset == Vector3::zeros()));
    }
}
