use std::fmt;

use nalgebra::{Matrix3, Vector3};
use num_rational::Ratio;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::symmetry::tokens::{tokenize, TokenKind};
use crate::warnings::issue_warning;

/// The three identifier labels a symmetry list is written in.
///
/// Almost always `("x", "y", "z")`; a handful of files declare their own
/// triple in a leading operator-free entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceIdentifiers([String; 3]);

impl Default for ReferenceIdentifiers {
    fn default() -> Self {
        ReferenceIdentifiers(["x".into(), "y".into(), "z".into()])
    }
}

impl ReferenceIdentifiers {
    pub fn new(first: impl Into<String>, second: impl Into<String>, third: impl Into<String>) -> Self {
        ReferenceIdentifiers([first.into(), second.into(), third.into()])
    }

    /// Axis index of an identifier token, matched case-insensitively.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.0.iter().position(|id| id.eq_ignore_ascii_case(token))
    }
}

/// Discovers the reference identifiers of a full symmetry list.
///
/// Picks the first entry containing none of the operator characters
/// `+ - /`, splits it on `,` or `;`, and adopts it when that yields
/// exactly three non-empty alphabetic tokens. Falls back to the default
/// `("x", "y", "z")` otherwise.
pub fn find_reference_identifiers<S: AsRef<str>>(lines: &[S]) -> ReferenceIdentifiers {
    for line in lines {
        let line = line.as_ref();
        if line.contains(['+', '-', '/']) {
            continue;
        }
        let fields: Vec<&str> = line
            .split([',', ';'])
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() == 3 && fields.iter().all(|f| f.chars().all(|c| c.is_ascii_alphabetic())) {
            return ReferenceIdentifiers::new(fields[0], fields[1], fields[2]);
        }
        break;
    }
    ReferenceIdentifiers::default()
}

/// An exact affine map of ℚ³: `p ↦ rotation · p + translation`.
///
/// The rotation block is expressed in the basis named by the reference
/// identifiers the operator was parsed under. Applied modulo ℤ³, the set
/// of equivalent positions attached to a cell forms a finite group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentPosition {
    pub rotation: Matrix3<Ratio<i32>>,
    pub translation: Vector3<Ratio<i32>>,
}

impl EquivalentPosition {
    pub fn new(rotation: Matrix3<Ratio<i32>>, translation: Vector3<Ratio<i32>>) -> Self {
        EquivalentPosition { rotation, translation }
    }

    /// The identity operator.
    pub fn identity() -> Self {
        EquivalentPosition {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Parses an operator string such as `-x+1/2, y, z+1/4`.
    pub fn parse(input: &str, refs: &ReferenceIdentifiers) -> Result<Self> {
        parse_equivalent_position(input, refs)
    }

    /// Applies the operator to a fractional point, without folding.
    pub fn apply(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let rotation = self.rotation.map(ratio_to_f64);
        let translation = self.translation.map(ratio_to_f64);
        rotation * point + translation
    }

    /// Whether this is the identity operator.
    pub fn is_identity(&self) -> bool {
        self.rotation == Matrix3::identity() && self.translation.iter().all(Zero::is_zero)
    }
}

fn ratio_to_f64(r: Ratio<i32>) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

fn parse_error(input: &str, reason: impl Into<String>) -> Error {
    Error::SymmetryParseError {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// The operator grammar, walked with three latent registers: a pending
/// integer numerator, a pending rational value (formed by `/`), and a
/// pending sign.
fn parse_equivalent_position(input: &str, refs: &ReferenceIdentifiers) -> Result<EquivalentPosition> {
    let tokens = tokenize(input)?;

    let mut rotation: Matrix3<Ratio<i32>> = Matrix3::zeros();
    let mut translation: Vector3<Ratio<i32>> = Vector3::zeros();

    let mut dim = 0usize;
    let mut sign: Option<bool> = None; // Some(true) = negative
    let mut num: Option<i32> = None;
    let mut val: Option<Ratio<i32>> = None;
    let mut awaiting_denominator = false;
    let mut row_has_coefficient = false;

    // moves any pending bare rational into the offset of the current row
    fn flush_offset(
        sign: &mut Option<bool>,
        num: &mut Option<i32>,
        val: &mut Option<Ratio<i32>>,
        translation: &mut Vector3<Ratio<i32>>,
        dim: usize,
        input: &str,
    ) {
        let pending = val.take().or_else(|| num.take().map(Ratio::from_integer));
        if let Some(mut value) = pending {
            if sign.take() == Some(true) {
                value = -value;
            }
            if !translation[dim].is_zero() {
                issue_warning!(
                    "symmetry operator {:?} accumulates several offsets on row {}",
                    input,
                    dim + 1
                );
            }
            translation[dim] += value;
        }
    }

    for token in tokens {
        match token.kind {
            TokenKind::Whitespace => {}
            TokenKind::Integer => {
                let digits = &input[token.start..token.end];
                let parsed: i32 = digits
                    .parse()
                    .map_err(|_| parse_error(input, format!("integer literal {digits:?} out of range")))?;
                if awaiting_denominator {
                    if parsed == 0 {
                        return Err(parse_error(input, "zero denominator"));
                    }
                    let numerator = num
                        .take()
                        .ok_or_else(|| parse_error(input, "division without a numerator"))?;
                    val = Some(Ratio::new(numerator, parsed));
                    awaiting_denominator = false;
                } else if num.is_some() || val.is_some() {
                    return Err(parse_error(input, format!("unexpected integer {digits:?}")));
                } else {
                    num = Some(parsed);
                }
            }
            TokenKind::Identifier => {
                let text = &input[token.start..token.end];
                let axis = refs
                    .position(text)
                    .ok_or_else(|| parse_error(input, format!("unknown identifier {text:?}")))?;
                if awaiting_denominator {
                    return Err(parse_error(input, "identifier in denominator position"));
                }
                let mut coefficient = val
                    .take()
                    .or_else(|| num.take().map(Ratio::from_integer))
                    .unwrap_or_else(One::one);
                if sign.take() == Some(true) {
                    coefficient = -coefficient;
                }
                rotation[(dim, axis)] += coefficient;
                row_has_coefficient = true;
            }
            TokenKind::Plus | TokenKind::Minus => {
                flush_offset(&mut sign, &mut num, &mut val, &mut translation, dim, input);
                if sign.is_some() {
                    return Err(parse_error(input, "consecutive signs"));
                }
                sign = Some(token.kind == TokenKind::Minus);
            }
            TokenKind::Slash => {
                if awaiting_denominator || num.is_none() || val.is_some() {
                    return Err(parse_error(input, "misplaced '/'"));
                }
                awaiting_denominator = true;
            }
            TokenKind::Comma | TokenKind::Semicolon | TokenKind::End => {
                if awaiting_denominator {
                    return Err(parse_error(input, "dangling '/'"));
                }
                flush_offset(&mut sign, &mut num, &mut val, &mut translation, dim, input);
                if sign.is_some() {
                    return Err(parse_error(input, "dangling sign"));
                }
                if !row_has_coefficient {
                    return Err(parse_error(input, format!("no coefficient on row {}", dim + 1)));
                }
                if token.kind == TokenKind::End {
                    if dim != 2 {
                        return Err(parse_error(input, format!("expected 3 rows, found {}", dim + 1)));
                    }
                    return Ok(EquivalentPosition::new(rotation, translation));
                }
                dim += 1;
                if dim >= 3 {
                    return Err(parse_error(input, "more than three rows"));
                }
                row_has_coefficient = false;
            }
        }
    }
    unreachable!("the token stream always ends with an End marker")
}

impl fmt::Display for EquivalentPosition {
    /// Renders in the canonical `x,y,z` basis, whitespace-free, with unit
    /// coefficients reduced to their sign and the leading `+` suppressed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const AXES: [&str; 3] = ["x", "y", "z"];
        for dim in 0..3 {
            if dim > 0 {
                write!(f, ",")?;
            }
            let mut first = true;
            for (axis, label) in AXES.iter().enumerate() {
                let coefficient = self.rotation[(dim, axis)];
                if coefficient.is_zero() {
                    continue;
                }
                if coefficient.is_negative() {
                    write!(f, "-")?;
                } else if !first {
                    write!(f, "+")?;
                }
                let magnitude = coefficient.abs();
                if !magnitude.is_one() {
                    write!(f, "{magnitude}")?;
                }
                write!(f, "{label}")?;
                first = false;
            }
            let offset = self.translation[dim];
            if !offset.is_zero() {
                if offset.is_negative() {
                    write!(f, "-")?;
                } else if !first {
                    write!(f, "+")?;
                }
                write!(f, "{}", offset.abs())?;
            } else if first {
                // a fully zero row still renders something parseable
                write!(f, "0")?;
            }
        }
        Ok(())
    }
}
