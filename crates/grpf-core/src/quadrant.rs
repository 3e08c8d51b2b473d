//! Phase quantization of complex function values.
//!
//! The argument of a nonzero complex value is quantized into one of four
//! quadrant labels. Edges of the mesh across which the label jumps by two
//! (a phase reversal) bound regions containing a zero or a pole.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Quantized phase of a complex function value.
///
/// `Node` marks vertices whose value was zero or non-finite; such vertices
/// are treated as already-resolved singular points and never participate in
/// phase-difference arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Quadrant {
    /// Zero or non-finite function value.
    #[default]
    Node,
    /// Re ≥ 0 and Im > 0.
    First,
    /// Re < 0 and Im ≥ 0.
    Second,
    /// Re ≤ 0 and Im < 0.
    Third,
    /// Re > 0 and Im ≤ 0.
    Fourth,
}

impl Quadrant {
    /// Quantizes a function value into its quadrant label.
    ///
    /// The four quadrants partition the punctured plane; the half-open sign
    /// conditions ensure every nonzero finite value lands in exactly one.
    #[must_use]
    pub fn classify(value: Complex64) -> Self {
        if !value.re.is_finite() || !value.im.is_finite() {
            return Self::Node;
        }
        if value.re == 0.0 && value.im == 0.0 {
            return Self::Node;
        }
        if value.re >= 0.0 && value.im > 0.0 {
            Self::First
        } else if value.re < 0.0 && value.im >= 0.0 {
            Self::Second
        } else if value.re <= 0.0 && value.im < 0.0 {
            Self::Third
        } else {
            Self::Fourth
        }
    }

    /// Numeric label as used in the phase-jump arithmetic (0 for `Node`).
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Node => 0,
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }

    /// Whether this vertex carries no usable phase.
    #[must_use]
    pub fn is_node(self) -> bool {
        self == Self::Node
    }
}

/// Signed quantized phase jump across a directed edge `from -> to`.
///
/// Returns a value in `{-1, 0, +1, +2}`; the two half-turn jumps are
/// congruent mod 4 and both map to `+2`. `None` if either endpoint is a
/// [`Quadrant::Node`].
#[must_use]
pub fn signed_jump(from: Quadrant, to: Quadrant) -> Option<i32> {
    if from.is_node() || to.is_node() {
        return None;
    }
    let delta = i32::from(to.index()) - i32::from(from.index());
    Some((delta + 1).rem_euclid(4) - 1)
}

/// Whether a signed jump marks a phase reversal (a candidate edge).
#[must_use]
pub fn is_reversal(jump: i32) -> bool {
    jump.abs() == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn classify_open_quadrants() {
        assert_eq!(Quadrant::classify(c(1.0, 1.0)), Quadrant::First);
        assert_eq!(Quadrant::classify(c(-1.0, 1.0)), Quadrant::Second);
        assert_eq!(Quadrant::classify(c(-1.0, -1.0)), Quadrant::Third);
        assert_eq!(Quadrant::classify(c(1.0, -1.0)), Quadrant::Fourth);
    }

    #[test]
    fn classify_axes() {
        // Positive real axis belongs to the fourth quadrant, positive
        // imaginary to the first, and so on around the circle.
        assert_eq!(Quadrant::classify(c(1.0, 0.0)), Quadrant::Fourth);
        assert_eq!(Quadrant::classify(c(0.0, 1.0)), Quadrant::First);
        assert_eq!(Quadrant::classify(c(-1.0, 0.0)), Quadrant::Second);
        assert_eq!(Quadrant::classify(c(0.0, -1.0)), Quadrant::Third);
    }

    #[test]
    fn classify_degenerate_values() {
        assert_eq!(Quadrant::classify(c(0.0, 0.0)), Quadrant::Node);
        assert_eq!(Quadrant::classify(c(f64::NAN, 1.0)), Quadrant::Node);
        assert_eq!(Quadrant::classify(c(1.0, f64::INFINITY)), Quadrant::Node);
        assert_eq!(Quadrant::classify(c(f64::NEG_INFINITY, 0.0)), Quadrant::Node);
    }

    #[test]
    fn every_nonzero_value_gets_exactly_one_quadrant() {
        for &re in &[-2.0, -1.0, 0.0, 1.0, 2.0] {
            for &im in &[-2.0, -1.0, 0.0, 1.0, 2.0] {
                let q = Quadrant::classify(c(re, im));
                if re == 0.0 && im == 0.0 {
                    assert!(q.is_node());
                } else {
                    assert!(!q.is_node(), "({re}, {im}) classified as Node");
                }
            }
        }
    }

    #[test]
    fn jump_between_adjacent_quadrants_is_one() {
        assert_eq!(signed_jump(Quadrant::First, Quadrant::Second), Some(1));
        assert_eq!(signed_jump(Quadrant::Second, Quadrant::First), Some(-1));
        assert_eq!(signed_jump(Quadrant::Fourth, Quadrant::First), Some(1));
        assert_eq!(signed_jump(Quadrant::First, Quadrant::Fourth), Some(-1));
    }

    #[test]
    fn jump_between_opposite_quadrants_is_a_reversal() {
        for (a, b) in [
            (Quadrant::First, Quadrant::Third),
            (Quadrant::Third, Quadrant::First),
            (Quadrant::Second, Quadrant::Fourth),
            (Quadrant::Fourth, Quadrant::Second),
        ] {
            let jump = signed_jump(a, b).unwrap();
            assert!(is_reversal(jump), "{a:?} -> {b:?} gave {jump}");
        }
    }

    #[test]
    fn jump_with_node_is_undefined() {
        assert_eq!(signed_jump(Quadrant::Node, Quadrant::First), None);
        assert_eq!(signed_jump(Quadrant::Third, Quadrant::Node), None);
    }

    #[test]
    fn zero_jump_is_not_a_reversal() {
        assert_eq!(signed_jump(Quadrant::Second, Quadrant::Second), Some(0));
        assert!(!is_reversal(0));
        assert!(!is_reversal(1));
        assert!(!is_reversal(-1));
    }
}
