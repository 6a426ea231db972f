use std::cmp::Ordering;
use std::fmt;

use nalgebra::Vector3;
use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{back_to_unit, demote_ratio, RationalWidth};
use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::graph::PeriodicGraph3D;

/// The canonical form of a crystallographic net.
///
/// Vertices are sorted by ascending fractional position, every position
/// lies in [0, 1)³ componentwise, and the cell carries no equivalents: the
/// net is its own asymmetric form. `T` is the integer width of the
/// rational coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalNet<T: RationalWidth> {
    pub cell: Cell,
    pub types: Vec<String>,
    pub pos: Vec<Vector3<Ratio<T>>>,
    pub graph: PeriodicGraph3D,
}

impl<T: RationalWidth> CrystalNet<T> {
    /// Number of vertices.
    pub fn nv(&self) -> usize {
        self.pos.len()
    }
}

/// A net tagged with the integer width selected for its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyCrystalNet {
    I8(CrystalNet<i8>),
    I16(CrystalNet<i16>),
    I32(CrystalNet<i32>),
    I64(CrystalNet<i64>),
    I128(CrystalNet<i128>),
    Big(CrystalNet<BigInt>),
}

macro_rules! dispatch {
    ($self:expr, $net:ident => $body:expr) => {
        match $self {
            AnyCrystalNet::I8($net) => $body,
            AnyCrystalNet::I16($net) => $body,
            AnyCrystalNet::I32($net) => $body,
            AnyCrystalNet::I64($net) => $body,
            AnyCrystalNet::I128($net) => $body,
            AnyCrystalNet::Big($net) => $body,
        }
    };
}

impl AnyCrystalNet {
    /// Canonicalizes an equilibrium placement into a net.
    ///
    /// Splits each coordinate into its integer offset and a fractional
    /// part in [0, 1), sorts the vertices by position, relabels the graph
    /// accordingly, compensates every edge offset by the per-vertex
    /// splits, clears the cell equivalents, and finally expresses the
    /// coordinates over the narrowest width whose range contains every
    /// numerator and denominator of the raw placement.
    pub fn from_placement(
        cell: Cell,
        types: Vec<String>,
        graph: PeriodicGraph3D,
        placement: &[Vector3<BigRational>],
    ) -> Result<Self> {
        assert_eq!(types.len(), placement.len(), "one element symbol per vertex");
        assert_eq!(graph.nv(), placement.len(), "one position per vertex");
        let n = placement.len();

        // 1) floor-split every coordinate
        let mut folded: Vec<Vector3<BigRational>> = Vec::with_capacity(n);
        let mut splits: Vec<Vector3<i32>> = Vec::with_capacity(n);
        for x in placement {
            let fractional = Vector3::new(
                back_to_unit(&x[0]),
                back_to_unit(&x[1]),
                back_to_unit(&x[2]),
            );
            let mut split = Vector3::zeros();
            for c in 0..3 {
                let whole = (&x[c] - &fractional[c]).to_integer();
                split[c] = whole.to_i32().ok_or_else(|| {
                    Error::SolverOverflow("equilibrium offset exceeds the lattice index range".into())
                })?;
            }
            folded.push(fractional);
            splits.push(split);
        }

        // 2) sort vertices by folded position
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| lex_cmp(&folded[a], &folded[b]));
        let mut permutation = vec![0usize; n];
        for (new, &old) in order.iter().enumerate() {
            permutation[old] = new;
        }

        // 3) compensate edge offsets, then relabel
        let mut graph = graph;
        graph.offset_representatives(&splits);
        let graph = graph.relabel(&permutation);

        let pos: Vec<Vector3<BigRational>> = order.iter().map(|&old| folded[old].clone()).collect();
        let types: Vec<String> = order.iter().map(|&old| types[old].clone()).collect();

        // 4) the net is expressed in its asymmetric form directly
        let cell = cell.with_equivalents(Vec::new());

        Ok(select_width(cell, types, pos, graph, placement))
    }

    /// Number of vertices.
    pub fn nv(&self) -> usize {
        dispatch!(self, net => net.nv())
    }

    pub fn types(&self) -> &[String] {
        dispatch!(self, net => &net.types)
    }

    pub fn graph(&self) -> &PeriodicGraph3D {
        dispatch!(self, net => &net.graph)
    }

    pub fn cell(&self) -> &Cell {
        dispatch!(self, net => &net.cell)
    }

    /// The name of the selected width, for reporting.
    pub fn width_name(&self) -> &'static str {
        match self {
            AnyCrystalNet::I8(_) => "i8",
            AnyCrystalNet::I16(_) => "i16",
            AnyCrystalNet::I32(_) => "i32",
            AnyCrystalNet::I64(_) => "i64",
            AnyCrystalNet::I128(_) => "i128",
            AnyCrystalNet::Big(_) => "bigint",
        }
    }

    /// Position of a vertex, widened back to arbitrary precision.
    pub fn position(&self, vertex: usize) -> Vector3<BigRational> {
        dispatch!(self, net => {
            let p = &net.pos[vertex];
            Vector3::new(widen(&p[0]), widen(&p[1]), widen(&p[2]))
        })
    }
}

fn widen<T: RationalWidth>(r: &Ratio<T>) -> BigRational {
    BigRational::new_raw(r.numer().to_bigint(), r.denom().to_bigint())
}

fn lex_cmp(a: &Vector3<BigRational>, b: &Vector3<BigRational>) -> Ordering {
    for c in 0..3 {
        match a[c].cmp(&b[c]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// The width ladder of the equilibrium solver: the first of i8, i16, i32,
/// i64, i128 whose range contains every numerator and denominator of the
/// raw placement wins; otherwise the coordinates stay arbitrary-precision.
fn select_width(
    cell: Cell,
    types: Vec<String>,
    pos: Vec<Vector3<BigRational>>,
    graph: PeriodicGraph3D,
    raw: &[Vector3<BigRational>],
) -> AnyCrystalNet {
    let mut minimum = BigInt::from(0);
    let mut maximum = BigInt::from(0);
    for x in raw {
        for c in 0..3 {
            for value in [x[c].numer(), x[c].denom()] {
                if value < &minimum {
                    minimum = value.clone();
                }
                if value > &maximum {
                    maximum = value.clone();
                }
            }
        }
    }

    macro_rules! try_width {
        ($ty:ty, $variant:ident) => {
            if <$ty as RationalWidth>::from_bigint(&minimum).is_some()
                && <$ty as RationalWidth>::from_bigint(&maximum).is_some()
            {
                return AnyCrystalNet::$variant(CrystalNet {
                    cell,
                    types,
                    pos: pos
                        .iter()
                        .map(|p| {
                            Vector3::new(
                                demote::<$ty>(&p[0]),
                                demote::<$ty>(&p[1]),
                                demote::<$ty>(&p[2]),
                            )
                        })
                        .collect(),
                    graph,
                });
            }
        };
    }

    try_width!(i8, I8);
    try_width!(i16, I16);
    try_width!(i32, I32);
    try_width!(i64, I64);
    try_width!(i128, I128);
    AnyCrystalNet::Big(CrystalNet {
        cell,
        types,
        pos,
        graph,
    })
}

fn demote<T: RationalWidth>(r: &BigRational) -> Ratio<T> {
    demote_ratio(r).expect("folded coordinates fit the selected width")
}

impl fmt::Display for AnyCrystalNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CrystalNet of {} vertices over {}", self.nv(), self.width_name())?;
        for v in 0..self.nv() {
            let p = self.position(v);
            writeln!(f, "  {:>3} {:>2}  ({}, {}, {})", v, self.types()[v], p[0], p[1], p[2])?;
        }
        for edge in self.graph().edges() {
            writeln!(
                f,
                "  {} - {} @ ({}, {}, {})",
                edge.src, edge.dst, edge.offset.x, edge.offset.y, edge.offset.z
            )?;
        }
        Ok(())
    }
}
