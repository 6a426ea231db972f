#[cfg(test)]
mod _tests_unit_cell {
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    use crate::cell::unit_cell::Cell;

    #[test]
    fn cubic_cell_is_ten_times_identity() {
        let cell = Cell::from_parameters(10.0, 10.0, 10.0, 90.0, 90.0, 90.0);
        let expected = Matrix3::identity() * 10.0;
        assert_relative_eq!(cell.mat, expected, epsilon = 1e-9);
    }

    #[test]
    fn basis_is_upper_triangular() {
        let cell = Cell::from_parameters(5.0, 6.0, 3.6, 80.0, 95.0, 110.0);
        assert_relative_eq!(cell.mat[(1, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cell.mat[(2, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cell.mat[(2, 1)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parameters_roundtrip() {
        let cell = Cell::from_parameters(3.0, 4.0, 5.0, 80.0, 90.0, 110.0);
        let (a, b, c, alpha, beta, gamma) = cell.cell_parameters();
        assert_relative_eq!(a, 3.0, epsilon = 1e-9);
        assert_relative_eq!(b, 4.0, epsilon = 1e-9);
        assert_relative_eq!(c, 5.0, epsilon = 1e-9);
        assert_relative_eq!(alpha, 80.0, epsilon = 1e-9);
        assert_relative_eq!(beta, 90.0, epsilon = 1e-9);
        assert_relative_eq!(gamma, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn volume_of_orthorhombic_cell() {
        let cell = Cell::from_parameters(3.0, 4.0, 5.0, 90.0, 90.0, 90.0);
        assert_relative_eq!(cell.volume(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn periodic_distance_folds_across_the_boundary() {
        let cell = Cell::from_parameters(10.0, 10.0, 10.0, 90.0, 90.0, 90.0);
        let u = Vector3::new(0.95, 0.0, 0.0);
        let v = Vector3::new(0.05, 0.0, 0.0);
        assert_relative_eq!(cell.periodic_distance(&u, &v), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn periodic_distance_is_symmetric_at_half() {
        let cell = Cell::from_parameters(8.0, 8.0, 8.0, 90.0, 90.0, 90.0);
        let u = Vector3::new(0.5, 0.5, 0.5);
        let v = Vector3::zeros();
        assert_relative_eq!(
            cell.periodic_distance(&u, &v),
            cell.periodic_distance(&v, &u),
            epsilon = 1e-12
        );
        assert_relative_eq!(cell.periodic_distance(&u, &v), (3.0f64).sqrt() * 4.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "cell lengths must be positive")]
    fn rejects_non_positive_lengths() {
        let _ = Cell::from_parameters(0.0, 1.0, 1.0, 90.0, 90.0, 90.0);
    }
}
