use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::symmetry::EquivalentPosition;

/// The seven lattice systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatticeSystem {
    #[default]
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

/// A crystallographic unit cell.
///
/// The basis matrix holds the Cartesian coordinates of the a, b, c vectors
/// as columns, upper-triangular in the convention a along x, b in the
/// xy-plane. Built once per structure; the only mutations are the
/// copy-with-replacement constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Lattice system tag.
    pub lattice_system: LatticeSystem,
    /// Hermann–Mauguin space-group symbol.
    pub spacegroup: String,
    /// Tabulated space-group number (1–230), 0 when unknown.
    pub tablenumber: u16,
    /// Cartesian basis, columns a, b, c.
    pub mat: Matrix3<f64>,
    /// Symmetry operators of the cell; the identity is implicit.
    pub equivalents: Vec<EquivalentPosition>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::from_parameters(1.0, 1.0, 1.0, 90.0, 90.0, 90.0)
    }
}

impl Cell {
    /// Builds the upper-triangular Cartesian basis from cell constants in
    /// Å and degrees:
    ///
    /// ```text
    /// [ a   b·cosγ   c·cosβ                     ]
    /// [ 0   b·sinγ   c·(cosα − cosβ·cosγ)/sinγ  ]
    /// [ 0   0        c·ω/sinγ                   ]
    /// ```
    ///
    /// with ω = √(1 − cos²α − cos²β − cos²γ + 2·cosα·cosβ·cosγ).
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "cell lengths must be positive");

        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();
        assert!(sin_gamma.abs() > 1e-12, "gamma must not be a multiple of 180°");

        let omega_squared = 1.0 - cos_alpha * cos_alpha - cos_beta * cos_beta
            - cos_gamma * cos_gamma
            + 2.0 * cos_alpha * cos_beta * cos_gamma;
        assert!(omega_squared > 0.0, "cell angles do not define a 3D cell");
        let omega = omega_squared.sqrt();

        let mat = Matrix3::new(
            a, b * cos_gamma, c * cos_beta,
            0.0, b * sin_gamma, c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma,
            0.0, 0.0, c * omega / sin_gamma,
        );

        Cell {
            lattice_system: LatticeSystem::default(),
            spacegroup: String::new(),
            tablenumber: 0,
            mat,
            equivalents: Vec::new(),
        }
    }

    /// Copy with the symmetry tags replaced.
    pub fn with_spacegroup(self, lattice_system: LatticeSystem, spacegroup: impl Into<String>, tablenumber: u16) -> Self {
        Cell {
            lattice_system,
            spacegroup: spacegroup.into(),
            tablenumber,
            ..self
        }
    }

    /// Copy with the equivalents replaced.
    pub fn with_equivalents(self, equivalents: Vec<EquivalentPosition>) -> Self {
        Cell { equivalents, ..self }
    }

    /// Copy with the basis matrix replaced.
    pub fn with_matrix(self, mat: Matrix3<f64>) -> Self {
        Cell { mat, ..self }
    }

    /// Cell constants (a, b, c, α, β, γ) in Å and degrees, recovered from
    /// the column norms and pairwise angles of the basis.
    pub fn cell_parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let va: Vector3<f64> = self.mat.column(0).into();
        let vb: Vector3<f64> = self.mat.column(1).into();
        let vc: Vector3<f64> = self.mat.column(2).into();

        let a = va.norm();
        let b = vb.norm();
        let c = vc.norm();

        let alpha = (vb.dot(&vc) / (b * c)).acos().to_degrees();
        let beta = (va.dot(&vc) / (a * c)).acos().to_degrees();
        let gamma = (va.dot(&vb) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// Cell volume in Å³.
    pub fn volume(&self) -> f64 {
        self.mat.determinant().abs()
    }

    /// Distance in Å between two fractional points under periodic
    /// boundary conditions: each component of the difference is folded to
    /// (−0.5, 0.5] before mapping through the basis.
    pub fn periodic_distance(&self, u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
        let mut delta = u - v;
        for i in 0..3 {
            delta[i] -= delta[i].round();
            if delta[i] <= -0.5 {
                delta[i] += 1.0;
            }
        }
        (self.mat * delta).norm()
    }
}
