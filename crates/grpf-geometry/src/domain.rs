//! Initial-mesh generators.
//!
//! Both generators lay points out so the resulting Delaunay triangles are
//! close to equilateral, which keeps the first selection pass well
//! conditioned. Only the returned sequence is contractual; the exact layout
//! is an implementation detail.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::f64::consts::TAU;

use num_complex::Complex64;

/// Height of an equilateral-triangle row relative to its edge length.
const ROW_RATIO: f64 = 0.866_025_403_784_438_6; // sqrt(3)/2

/// Covers the axis-aligned rectangle `[z_lo, z_hi]` with a staggered
/// triangular lattice of spacing `step`.
///
/// Every other row is shifted by half a step and padded with the two
/// boundary columns, so the rectangle boundary is fully sampled.
///
/// # Panics
///
/// Panics if `step` is not positive and finite, or if `z_hi` does not lie
/// strictly above and to the right of `z_lo`.
#[must_use]
pub fn rectangular_domain(z_lo: Complex64, z_hi: Complex64, step: f64) -> Vec<Complex64> {
    assert!(step > 0.0 && step.is_finite(), "step must be positive");
    assert!(
        z_hi.re > z_lo.re && z_hi.im > z_lo.im,
        "z_hi must be strictly greater than z_lo on both axes"
    );

    let width = z_hi.re - z_lo.re;
    let height = z_hi.im - z_lo.im;

    let cols = (width / step).ceil() as usize + 1;
    let rows = (height / (step * ROW_RATIO)).ceil() as usize + 1;

    let dx = width / (cols - 1) as f64;
    let dy = height / (rows - 1) as f64;

    let mut points = Vec::with_capacity(rows * (cols + 1));
    for row in 0..rows {
        let y = z_lo.im + dy * row as f64;
        if row % 2 == 0 {
            for col in 0..cols {
                let x = z_lo.re + dx * col as f64;
                points.push(Complex64::new(x, y));
            }
        } else {
            // Shifted row: interior points at half-step offsets, plus the
            // two boundary columns so the rectangle edge stays sampled.
            points.push(Complex64::new(z_lo.re, y));
            for col in 0..cols - 1 {
                let x = z_lo.re + dx * (col as f64 + 0.5);
                points.push(Complex64::new(x, y));
            }
            points.push(Complex64::new(z_hi.re, y));
        }
    }
    points
}

/// Fills the disk around `center` with a ring layout of spacing `step`.
///
/// Rings are spaced at equilateral-row distance; consecutive rings are
/// rotated by half their angular pitch. The outermost ring lies exactly on
/// the boundary circle.
///
/// # Panics
///
/// Panics if `radius` or `step` is not positive and finite.
#[must_use]
pub fn disk_domain(center: Complex64, radius: f64, step: f64) -> Vec<Complex64> {
    assert!(step > 0.0 && step.is_finite(), "step must be positive");
    assert!(
        radius > 0.0 && radius.is_finite(),
        "radius must be positive"
    );

    let rings = ((radius / (step * ROW_RATIO)).ceil() as usize).max(1);
    let dr = radius / rings as f64;

    let mut points = vec![center];
    for ring in 1..=rings {
        let r = dr * ring as f64;
        let count = ((TAU * r / step).ceil() as usize).max(6);
        let phase = if ring % 2 == 0 { 0.5 } else { 0.0 };
        for i in 0..count {
            let theta = TAU * (i as f64 + phase) / count as f64;
            points.push(center + Complex64::from_polar(r, theta));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rectangle_covers_all_four_corners() {
        let lo = Complex64::new(-2.0, -1.0);
        let hi = Complex64::new(2.0, 1.0);
        let points = rectangular_domain(lo, hi, 0.25);

        for corner in [lo, hi, Complex64::new(lo.re, hi.im), Complex64::new(hi.re, lo.im)] {
            assert!(
                points.iter().any(|z| (z - corner).norm() < 1e-9),
                "corner {corner} missing"
            );
        }
    }

    #[test]
    fn rectangle_points_stay_inside_the_bounds() {
        let lo = Complex64::new(0.0, 0.0);
        let hi = Complex64::new(1.0, 2.0);
        for z in rectangular_domain(lo, hi, 0.3) {
            assert!(z.re >= lo.re - 1e-12 && z.re <= hi.re + 1e-12);
            assert!(z.im >= lo.im - 1e-12 && z.im <= hi.im + 1e-12);
        }
    }

    #[test]
    fn rectangle_spacing_tracks_the_step() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.1,
        );
        // 21 columns, 25-ish rows of 21/22 points each
        assert!(points.len() > 400);
        assert!(points.len() < 700);
    }

    #[test]
    #[should_panic(expected = "step must be positive")]
    fn rectangle_rejects_zero_step() {
        let _ = rectangular_domain(Complex64::new(0.0, 0.0), Complex64::new(1.0, 1.0), 0.0);
    }

    #[test]
    fn disk_includes_center_and_boundary() {
        let center = Complex64::new(1.0, -1.0);
        let radius = 2.0;
        let points = disk_domain(center, radius, 0.25);

        assert_eq!(points[0], center);
        let max_r = points
            .iter()
            .map(|z| (z - center).norm())
            .fold(0.0, f64::max);
        assert!((max_r - radius).abs() < 1e-9);
    }

    #[test]
    fn disk_points_stay_inside_the_circle() {
        let center = Complex64::new(0.0, 0.0);
        for z in disk_domain(center, 1.0, 0.1) {
            assert!((z - center).norm() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn disk_has_no_duplicate_points() {
        let points = disk_domain(Complex64::new(0.0, 0.0), 1.0, 0.2);
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!((a - b).norm() > 1e-9);
            }
        }
    }

    proptest! {
        #[test]
        fn disk_stays_inside_and_reaches_the_boundary(
            radius in 0.1_f64..3.0,
            step in 0.05_f64..0.5,
        ) {
            let center = Complex64::new(0.5, -0.5);
            let points = disk_domain(center, radius, step);
            let mut max_r: f64 = 0.0;
            for z in &points {
                let r = (z - center).norm();
                prop_assert!(r <= radius + 1e-9);
                max_r = max_r.max(r);
            }
            prop_assert!((max_r - radius).abs() < 1e-9);
        }
    }
}
