//! Affine bijection between user coordinates and the triangulator's
//! admissible square.
//!
//! The triangulator only accepts points strictly inside a small open square.
//! All mesh coordinates therefore live in that square, and every insert and
//! every output passes through the forward or inverse transform. The scale is
//! isotropic, so edge-length ratios (and triangle skinniness) are preserved;
//! absolute lengths are converted back to user coordinates before any
//! tolerance comparison.

use glam::DVec2;
use num_complex::Complex64;

use crate::error::{GrpfError, Result};

/// Lower bound of the admissible open square, on each axis.
pub const MIN_COORD: f64 = 1.0 + f64::EPSILON;

/// Upper bound of the admissible open square, on each axis.
pub const MAX_COORD: f64 = 2.0 - 2.0 * f64::EPSILON;

/// Fraction of the square kept free on each side as a safety margin, so that
/// refinement points (always inside original triangles) stay admissible even
/// after round-off.
const MARGIN_FRACTION: f64 = 0.05;

/// Isotropic affine map from the user's bounding rectangle into the
/// admissible square, plus its inverse.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    /// Minimum corner of the user bounding rectangle.
    user_min: DVec2,
    /// Maximum corner of the user bounding rectangle.
    user_max: DVec2,
    /// Image of `user_min` in the admissible square.
    square_origin: DVec2,
    /// Multiplicative factor from user lengths to mapped lengths.
    scale: f64,
}

impl Mapper {
    /// Builds the mapper from the bounding rectangle of the given points.
    ///
    /// # Errors
    ///
    /// [`GrpfError::EmptyDomain`] if `points` is empty,
    /// [`GrpfError::DegenerateDomain`] if any coordinate is non-finite or all
    /// points coincide.
    pub fn from_points(points: &[Complex64]) -> Result<Self> {
        if points.is_empty() {
            return Err(GrpfError::EmptyDomain);
        }

        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for z in points {
            if !z.re.is_finite() || !z.im.is_finite() {
                return Err(GrpfError::DegenerateDomain(
                    "sample coordinates must be finite",
                ));
            }
            min = min.min(DVec2::new(z.re, z.im));
            max = max.max(DVec2::new(z.re, z.im));
        }

        let extent = (max - min).max_element();
        if extent <= 0.0 {
            return Err(GrpfError::DegenerateDomain("sample points all coincide"));
        }

        let side = MAX_COORD - MIN_COORD;
        let usable = side * (1.0 - 2.0 * MARGIN_FRACTION);
        let square_origin = DVec2::splat(MIN_COORD + side * MARGIN_FRACTION);

        Ok(Self {
            user_min: min,
            user_max: max,
            square_origin,
            scale: usable / extent,
        })
    }

    /// Maps a user-plane point into the admissible square.
    #[must_use]
    pub fn map(&self, z: Complex64) -> DVec2 {
        self.square_origin + (DVec2::new(z.re, z.im) - self.user_min) * self.scale
    }

    /// Maps a square point back to the user plane. Exact inverse of [`map`]
    /// up to round-off.
    ///
    /// [`map`]: Mapper::map
    #[must_use]
    pub fn unmap(&self, p: DVec2) -> Complex64 {
        let z = self.user_min + (p - self.square_origin) / self.scale;
        Complex64::new(z.x, z.y)
    }

    /// Converts a length measured in the square back to user coordinates.
    ///
    /// The Jacobian is a constant isotropic scale, so this equals inverse
    /// mapping both endpoints and measuring.
    #[must_use]
    pub fn user_length(&self, mapped_length: f64) -> f64 {
        mapped_length / self.scale
    }

    /// Whether a mapped point lies strictly inside the admissible square.
    #[must_use]
    pub fn is_admissible(p: DVec2) -> bool {
        p.x > MIN_COORD && p.x < MAX_COORD && p.y > MIN_COORD && p.y < MAX_COORD
    }

    /// Minimum corner of the user bounding rectangle.
    #[must_use]
    pub fn user_min(&self) -> Complex64 {
        Complex64::new(self.user_min.x, self.user_min.y)
    }

    /// Maximum corner of the user bounding rectangle.
    #[must_use]
    pub fn user_max(&self) -> Complex64 {
        Complex64::new(self.user_max.x, self.user_max.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn square_mapper() -> Mapper {
        Mapper::from_points(&[Complex64::new(-2.0, -2.0), Complex64::new(2.0, 2.0)]).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Mapper::from_points(&[]),
            Err(GrpfError::EmptyDomain)
        ));
    }

    #[test]
    fn coincident_points_are_rejected() {
        let z = Complex64::new(0.5, -0.25);
        assert!(matches!(
            Mapper::from_points(&[z, z, z]),
            Err(GrpfError::DegenerateDomain(_))
        ));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let points = [Complex64::new(0.0, 0.0), Complex64::new(f64::NAN, 1.0)];
        assert!(matches!(
            Mapper::from_points(&points),
            Err(GrpfError::DegenerateDomain(_))
        ));
    }

    #[test]
    fn corners_map_inside_the_square() {
        let mapper = square_mapper();
        for z in [
            Complex64::new(-2.0, -2.0),
            Complex64::new(2.0, 2.0),
            Complex64::new(-2.0, 2.0),
            Complex64::new(2.0, -2.0),
            Complex64::new(0.0, 0.0),
        ] {
            let p = mapper.map(z);
            assert!(Mapper::is_admissible(p), "{z} mapped to {p:?}");
        }
    }

    #[test]
    fn user_length_matches_unmapped_distance() {
        let mapper = square_mapper();
        let a = mapper.map(Complex64::new(-1.0, 0.5));
        let b = mapper.map(Complex64::new(1.0, 0.5));
        assert_relative_eq!(
            mapper.user_length(a.distance(b)),
            2.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn anisotropic_rectangle_keeps_isotropic_scale() {
        // A wide flat rectangle must still use one scale for both axes.
        let mapper =
            Mapper::from_points(&[Complex64::new(0.0, 0.0), Complex64::new(10.0, 1.0)]).unwrap();
        let dx = mapper.map(Complex64::new(1.0, 0.0)) - mapper.map(Complex64::new(0.0, 0.0));
        let dy = mapper.map(Complex64::new(0.0, 1.0)) - mapper.map(Complex64::new(0.0, 0.0));
        assert_relative_eq!(dx.length(), dy.length(), max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn round_trip_within_ulps(re in -2.0_f64..2.0, im in -2.0_f64..2.0) {
            let mapper = square_mapper();
            let z = Complex64::new(re, im);
            let back = mapper.unmap(mapper.map(z));
            // 4 ULPs at the magnitude of the domain.
            let tol = 4.0 * f64::EPSILON * 4.0;
            prop_assert!((back.re - re).abs() <= tol);
            prop_assert!((back.im - im).abs() <= tol);
        }
    }
}
