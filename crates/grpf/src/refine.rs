//! Adaptive refinement around phase reversals.
//!
//! Each pass subdivides the candidate triangles whose edges are still longer
//! than the user tolerance, plus any skinny triangle leaning against a
//! candidate (slivers starve the phase sum along the contour if left alone).
//! New sample points are the edge midpoints, deduplicated through the mesh
//! store's snap grid.

use glam::DVec2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use grpf_core::{Parameters, Result};
use grpf_geometry::MeshStore;

use crate::evaluate::evaluate_pending;
use crate::select::{edge_to_triangles, select};

/// How a grpf run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No candidate triangle has an edge above the tolerance.
    Converged,
    /// `max_iterations` was reached first; results are best-effort.
    IterationLimit,
    /// `max_nodes` was reached first; results are best-effort.
    NodeLimit,
}

/// Runs the refinement loop to completion.
///
/// Assumes the initial points are already in the mesh. Returns the outcome
/// and the number of selection passes performed (so an immediately quiet
/// region reports one iteration).
pub fn run<F>(store: &mut MeshStore, f: &F, params: &Parameters) -> Result<(Outcome, usize)>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    evaluate_pending(store, f, params.multithreading);

    let mut passes = 0_usize;
    loop {
        passes += 1;
        let triangles = store.triangles();
        let selection = select(store, &triangles);

        if selection.candidate_triangles.is_empty() {
            log::debug!("pass {passes}: no candidate triangles, converged");
            return Ok((Outcome::Converged, passes));
        }

        // Limit checks come before the tolerance check, so a run that hits a
        // cap with work remaining reports the cap.
        if passes - 1 >= params.max_iterations {
            log::warn!(
                "stopping after {} refinement rounds with {} candidate triangles left",
                params.max_iterations,
                selection.candidate_triangles.len()
            );
            return Ok((Outcome::IterationLimit, passes));
        }
        if store.vertex_count() >= params.max_nodes {
            log::warn!(
                "stopping at {} vertices with {} candidate triangles left",
                store.vertex_count(),
                selection.candidate_triangles.len()
            );
            return Ok((Outcome::NodeLimit, passes));
        }

        // Tolerance is measured in user coordinates.
        let mapper = *store.mapper();
        let over_tolerance: Vec<usize> = selection
            .candidate_triangles
            .iter()
            .copied()
            .filter(|&t| mapper.user_length(triangles[t].longest_edge()) > params.tolerance)
            .collect();
        if over_tolerance.is_empty() {
            log::debug!("pass {passes}: all candidate edges below tolerance, converged");
            return Ok((Outcome::Converged, passes));
        }

        let mut subdivide = over_tolerance;

        // Skinny triangles leaning against any candidate.
        let adjacency = edge_to_triangles(&triangles);
        for &t in &selection.candidate_triangles {
            for key in triangles[t].edge_keys() {
                for &neighbor in &adjacency[&key] {
                    if neighbor != t && triangles[neighbor].elongation() > params.skinny_ratio {
                        subdivide.push(neighbor);
                    }
                }
            }
        }
        // Triangle-index order keeps insertion order, and with it the whole
        // run, deterministic.
        subdivide.sort_unstable();
        subdivide.dedup();

        let mut new_points: Vec<DVec2> = Vec::with_capacity(subdivide.len() * 3);
        for &t in &subdivide {
            new_points.extend(triangles[t].edge_midpoints());
        }
        let added = store.insert_mapped(&new_points)?;
        if added.is_empty() {
            // Every midpoint collapsed onto the snap grid; nothing further
            // can be resolved at this scale.
            log::warn!("pass {passes}: refinement stalled below the snap grid");
            return Ok((Outcome::Converged, passes));
        }
        let evaluated = evaluate_pending(store, f, params.multithreading);

        log::debug!(
            "pass {passes}: subdivided {} triangles, {} new vertices, {} total",
            subdivide.len(),
            evaluated,
            store.vertex_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpf_core::Mapper;
    use grpf_geometry::rectangular_domain;

    fn seeded(points: &[Complex64]) -> MeshStore {
        let mapper = Mapper::from_points(points).unwrap();
        let mut store = MeshStore::new(mapper, points.len() * 2);
        store.insert_user_points(points).unwrap();
        store
    }

    #[test]
    fn quiet_region_converges_on_the_first_pass() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.5,
        );
        let params = Parameters::default();
        let mut store = seeded(&points);
        let initial = store.vertex_count();

        let f = |z: Complex64| z.exp();
        let (outcome, passes) = run(&mut store, &f, &params).unwrap();

        assert_eq!(outcome, Outcome::Converged);
        assert_eq!(passes, 1);
        assert_eq!(store.vertex_count(), initial);
    }

    #[test]
    fn refinement_only_adds_vertices() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.4,
        );
        let params = Parameters {
            tolerance: 1e-3,
            ..Parameters::default()
        };
        let mut store = seeded(&points);
        let initial = store.vertex_count();

        let f = |z: Complex64| z - Complex64::new(0.1, 0.1);
        let (outcome, _) = run(&mut store, &f, &params).unwrap();

        assert_eq!(outcome, Outcome::Converged);
        assert!(store.vertex_count() > initial);
    }

    #[test]
    fn iteration_cap_is_honored() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.4,
        );
        let params = Parameters {
            max_iterations: 2,
            ..Parameters::default()
        };
        let mut store = seeded(&points);

        let f = |z: Complex64| z - Complex64::new(0.1, 0.1);
        let (outcome, passes) = run(&mut store, &f, &params).unwrap();

        assert_eq!(outcome, Outcome::IterationLimit);
        assert_eq!(passes, 3);
    }

    #[test]
    fn zero_iterations_stops_before_any_refinement() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.4,
        );
        let params = Parameters {
            max_iterations: 0,
            ..Parameters::default()
        };
        let mut store = seeded(&points);
        let initial = store.vertex_count();

        let f = |z: Complex64| z - Complex64::new(0.1, 0.1);
        let (outcome, _) = run(&mut store, &f, &params).unwrap();

        assert_eq!(outcome, Outcome::IterationLimit);
        assert_eq!(store.vertex_count(), initial);
    }

    #[test]
    fn node_cap_is_honored() {
        let points = rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.4,
        );
        let initial = points.len();
        let params = Parameters {
            max_nodes: initial + 5,
            ..Parameters::default()
        };
        let mut store = seeded(&points);

        let f = |z: Complex64| z - Complex64::new(0.1, 0.1);
        let (outcome, _) = run(&mut store, &f, &params).unwrap();

        assert_eq!(outcome, Outcome::NodeLimit);
        // One round can overshoot the cap, but not by more than its own
        // midpoint batch.
        assert!(store.vertex_count() >= initial + 5);
    }
}
