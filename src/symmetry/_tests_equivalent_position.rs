#[cfg(test)]
mod _tests_equivalent_position {
    use nalgebra::{Matrix3, Vector3};
    use num_rational::Ratio;

    use crate::symmetry::equivalent_position::{
        find_reference_identifiers, EquivalentPosition, ReferenceIdentifiers,
    };

    fn r(numerator: i32, denominator: i32) -> Ratio<i32> {
        Ratio::new(numerator, denominator)
    }

    fn parse(input: &str) -> EquivalentPosition {
        EquivalentPosition::parse(input, &ReferenceIdentifiers::default()).unwrap()
    }

    #[test]
    fn parses_glide_operator() {
        let op = parse("-x+1/2, y, z+1/4");
        let expected_rotation = Matrix3::from_diagonal(&Vector3::new(r(-1, 1), r(1, 1), r(1, 1)));
        assert_eq!(op.rotation, expected_rotation);
        assert_eq!(op.translation, Vector3::new(r(1, 2), r(0, 1), r(1, 4)));
    }

    #[test]
    fn renders_whitespace_free() {
        let op = parse("-x+1/2, y, z+1/4");
        assert_eq!(op.to_string(), "-x+1/2,y,z+1/4");
    }

    #[test]
    fn parses_shear_operator() {
        let op = parse("x-y, x, z");
        let expected_rotation = Matrix3::new(
            r(1, 1), r(-1, 1), r(0, 1),
            r(1, 1), r(0, 1), r(0, 1),
            r(0, 1), r(0, 1), r(1, 1),
        );
        assert_eq!(op.rotation, expected_rotation);
        assert_eq!(op.translation, Vector3::new(r(0, 1), r(0, 1), r(0, 1)));
    }

    #[test]
    fn roundtrips_through_rendering() {
        let samples = [
            "x,y,z",
            "-x,-y,-z",
            "-x+1/2, y, z+1/4",
            "x-y,x,z",
            "y+3/4, -x, 2z-1/3",
            "-1/2+x, y, z",
            "z,x,y",
            "2x-3y+1/6, -z, y",
        ];
        let refs = ReferenceIdentifiers::default();
        for sample in samples {
            let parsed = EquivalentPosition::parse(sample, &refs).unwrap();
            let rendered = parsed.to_string();
            let reparsed = EquivalentPosition::parse(&rendered, &refs).unwrap();
            assert_eq!(parsed, reparsed, "{sample} -> {rendered} did not roundtrip");
        }
    }

    #[test]
    fn coefficient_before_identifier() {
        let op = parse("3x, 1/2y, z");
        assert_eq!(op.rotation[(0, 0)], r(3, 1));
        assert_eq!(op.rotation[(1, 1)], r(1, 2));
        assert_eq!(op.rotation[(2, 2)], r(1, 1));
    }

    #[test]
    fn bare_offsets_accumulate() {
        let op = parse("x+1/2+1/3, y, z");
        assert_eq!(op.translation[0], r(5, 6));
    }

    #[test]
    fn semicolons_separate_rows() {
        let op = parse("x; y; z");
        assert!(op.is_identity());
    }

    #[test]
    fn applies_to_fractional_points() {
        let op = parse("-x+1/2, y, z+1/4");
        let image = op.apply(&Vector3::new(0.25, 0.5, 0.0));
        assert!((image - Vector3::new(0.25, 0.5, 0.25)).norm() < 1e-12);
    }

    #[test]
    fn rejects_malformed_operators() {
        let refs = ReferenceIdentifiers::default();
        for bad in [
            "x,y",          // two rows
            "x,y,z,x",      // four rows
            "x,y/2,z",      // slash without numerator
            "x,1/0,z",      // zero denominator
            "q,y,z",        // unknown identifier
            "x+-y,y,z",     // consecutive signs
            "x,,z",         // empty row
            "1/2,y,z",      // offset-only row
            "x+,y,z",       // dangling sign
            "x,y,z+1/",     // dangling slash
        ] {
            assert!(
                EquivalentPosition::parse(bad, &refs).is_err(),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn discovers_declared_identifiers() {
        let lines = ["a, b, c", "-a+1/2, b, c"];
        let refs = find_reference_identifiers(&lines);
        assert_eq!(refs, ReferenceIdentifiers::new("a", "b", "c"));

        let op = EquivalentPosition::parse("-a+1/2, b, c", &refs).unwrap();
        assert_eq!(op.rotation[(0, 0)], r(-1, 1));
        assert_eq!(op.translation[0], r(1, 2));
    }

    #[test]
    fn defaults_when_no_declaration_exists() {
        let lines = ["x, y, z", "-x, -y, z+1/2"];
        assert_eq!(find_reference_identifiers(&lines), ReferenceIdentifiers::default());
        let empty: [&str; 0] = [];
        assert_eq!(find_reference_identifiers(&empty), ReferenceIdentifiers::default());
    }
}
