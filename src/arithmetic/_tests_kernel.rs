#[cfg(test)]
mod _tests_kernel {
    use nalgebra::Vector3;
    use num_bigint::BigInt;
    use num_rational::{BigRational, Ratio};

    use crate::arithmetic::kernel::{back_to_unit, is_rank3, is_singular, lattice_rank};

    fn q(numerator: i64, denominator: i64) -> BigRational {
        BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
    }

    fn int_cols(cols: &[[i64; 3]]) -> Vec<[BigRational; 3]> {
        cols.iter()
            .map(|c| [q(c[0], 1), q(c[1], 1), q(c[2], 1)])
            .collect()
    }

    #[test]
    fn back_to_unit_examples() {
        assert_eq!(back_to_unit(&Ratio::new(5, 2)), Ratio::new(1, 2));
        assert_eq!(back_to_unit(&Ratio::new(-7, 3)), Ratio::new(2, 3));
        assert_eq!(back_to_unit(&Ratio::new(-1, 1)), Ratio::new(0, 1));
        assert_eq!(back_to_unit(&Ratio::new(0, 1)), Ratio::new(0, 1));
    }

    #[test]
    fn back_to_unit_is_a_fold() {
        for numerator in -30i64..30 {
            for denominator in 1i64..8 {
                let r = Ratio::new(numerator, denominator);
                let folded = back_to_unit(&r);
                assert!(folded >= Ratio::new(0, 1), "{r} folded below zero");
                assert!(folded < Ratio::new(1, 1), "{r} folded above one");
                let difference = r - folded;
                assert!(difference.is_integer(), "{r} - fold({r}) is not integral");
            }
        }
    }

    #[test]
    fn identity_is_not_singular() {
        let cols = [
            [q(1, 1), q(0, 1), q(0, 1)],
            [q(0, 1), q(1, 1), q(0, 1)],
            [q(0, 1), q(0, 1), q(1, 1)],
        ];
        assert!(!is_singular(&cols).unwrap());
    }

    #[test]
    fn rank_deficient_matrix_is_singular() {
        // third column = first + second
        let cols = [
            [q(1, 1), q(2, 1), q(0, 1)],
            [q(0, 1), q(1, 1), q(1, 1)],
            [q(1, 1), q(3, 1), q(1, 1)],
        ];
        assert!(is_singular(&cols).unwrap());
    }

    #[test]
    fn zero_first_row_is_singular() {
        let cols = [
            [q(0, 1), q(1, 1), q(0, 1)],
            [q(0, 1), q(0, 1), q(1, 1)],
            [q(0, 1), q(2, 1), q(3, 1)],
        ];
        assert!(is_singular(&cols).unwrap());
    }

    #[test]
    fn singularity_test_widens_past_i8() {
        // entries fit i8 but the elimination products do not
        let cols = [
            [q(127, 1), q(1, 1), q(0, 1)],
            [q(126, 1), q(127, 1), q(0, 1)],
            [q(0, 1), q(0, 1), q(1, 1)],
        ];
        assert!(!is_singular(&cols).unwrap());
    }

    #[test]
    fn rational_entries() {
        let cols = [
            [q(1, 2), q(0, 1), q(0, 1)],
            [q(1, 3), q(2, 3), q(0, 1)],
            [q(1, 6), q(1, 3), q(0, 1)],
        ];
        // third column is half the second plus zero of the first in rows 2..3
        assert!(is_singular(&cols).unwrap());
    }

    #[test]
    fn rank3_of_standard_basis() {
        let cols = int_cols(&[[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        assert!(is_rank3(&cols).unwrap());
    }

    #[test]
    fn rank3_skips_colinear_columns() {
        let cols = int_cols(&[[0, 0, 0], [1, 1, 0], [2, 2, 0], [-3, -3, 0], [0, 1, 0], [0, 0, 5]]);
        assert!(is_rank3(&cols).unwrap());
    }

    #[test]
    fn coplanar_columns_are_not_rank3() {
        let cols = int_cols(&[[1, 0, 0], [0, 1, 0], [1, 1, 0], [5, -2, 0]]);
        assert!(!is_rank3(&cols).unwrap());
    }

    #[test]
    fn lattice_rank_ladder() {
        assert_eq!(lattice_rank(&[]).unwrap(), 0);
        assert_eq!(lattice_rank(&[Vector3::zeros()]).unwrap(), 0);
        assert_eq!(
            lattice_rank(&[Vector3::new(2, 0, 0), Vector3::new(-4, 0, 0)]).unwrap(),
            1
        );
        assert_eq!(
            lattice_rank(&[Vector3::new(1, 0, 0), Vector3::new(0, 1, 0), Vector3::new(3, 5, 0)]).unwrap(),
            2
        );
        assert_eq!(
            lattice_rank(&[
                Vector3::new(1, 0, 0),
                Vector3::new(0, 1, 0),
                Vector3::new(0, 0, 1)
            ])
            .unwrap(),
            3
        );
    }

    #[test]
    fn lattice_rank_ignores_zero_prefix() {
        let vs = [Vector3::zeros(), Vector3::new(0, 0, 7)];
        assert_eq!(lattice_rank(&vs).unwrap(), 1);
    }
}
