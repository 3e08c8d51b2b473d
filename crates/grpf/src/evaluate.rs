//! Function evaluation over newly inserted vertices.
//!
//! Each vertex is evaluated exactly once. With multithreading enabled the
//! evaluations run as a data-parallel map with a join barrier; results are
//! written back after the join, one slot per vertex, so later selection
//! passes observe every sample. Failures of the user function, whether a
//! non-finite value or a panic, are absorbed per vertex as node samples.

use std::panic::{catch_unwind, AssertUnwindSafe};

use num_complex::Complex64;
use rayon::prelude::*;

use grpf_core::Quadrant;
use grpf_geometry::{MeshStore, VertexSample};

/// Evaluates `f` at every pending vertex and stores value and quadrant.
///
/// Returns the number of vertices evaluated. Non-finite values (and exact
/// zeros) are tagged [`Quadrant::Node`] and never retried; a panicking `f`
/// is caught and tags its own vertex the same way.
pub fn evaluate_pending<F>(store: &mut MeshStore, f: &F, parallel: bool) -> usize
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let pending = store.pending_vertices();
    if pending.is_empty() {
        return 0;
    }

    let positions: Vec<Complex64> = pending.iter().map(|&v| store.user_position(v)).collect();

    let samples: Vec<VertexSample> = if parallel {
        positions.par_iter().map(|&z| sample_at(f, z)).collect()
    } else {
        positions.iter().map(|&z| sample_at(f, z)).collect()
    };

    for (&vertex, sample) in pending.iter().zip(samples) {
        store.set_sample(vertex, sample);
    }
    pending.len()
}

fn sample_at<F>(f: &F, z: Complex64) -> VertexSample
where
    F: Fn(Complex64) -> Complex64,
{
    match catch_unwind(AssertUnwindSafe(|| f(z))) {
        Ok(value) => VertexSample {
            value,
            quadrant: Quadrant::classify(value),
        },
        Err(_) => {
            log::debug!("function panicked at {z}, tagging the vertex as a node");
            VertexSample {
                value: Complex64::new(f64::NAN, f64::NAN),
                quadrant: Quadrant::Node,
            }
        }
    }
}
