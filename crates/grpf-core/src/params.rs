//! Configuration parameters for a grpf run.

use serde::{Deserialize, Serialize};

use crate::error::{GrpfError, Result};

/// Tuning parameters for the root-finding engine.
///
/// A `Parameters` value is immutable for the duration of a [`grpf`] call;
/// construct one, adjust the fields you care about, and pass it by reference.
///
/// [`grpf`]: https://docs.rs/grpf-rs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Capacity hint for the triangulation (number of expected vertices).
    pub tess_sizehint: usize,

    /// Edge-length stopping tolerance, measured in user coordinates.
    ///
    /// Refinement continues until no candidate triangle has an edge longer
    /// than this.
    pub tolerance: f64,

    /// Maximum number of refinement iterations before giving up.
    pub max_iterations: usize,

    /// Maximum number of mesh vertices before giving up.
    pub max_nodes: usize,

    /// Longest-to-shortest edge ratio above which a triangle counts as skinny.
    pub skinny_ratio: f64,

    /// Evaluate the user function in parallel across new vertices.
    ///
    /// The function must be pure and reentrant when this is enabled.
    pub multithreading: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tess_sizehint: 5000,
            tolerance: 1e-9,
            max_iterations: 100,
            max_nodes: 500_000,
            skinny_ratio: 3.0,
            multithreading: false,
        }
    }
}

impl Parameters {
    /// Checks that every field is in its documented range.
    ///
    /// `max_nodes` is additionally required to be at least the initial vertex
    /// count, which is only known at the entry point and checked there.
    pub fn validate(&self) -> Result<()> {
        if self.tess_sizehint == 0 {
            return Err(GrpfError::InvalidParameters("tess_sizehint must be >= 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(GrpfError::InvalidParameters(
                "tolerance must be positive and finite",
            ));
        }
        if !(self.skinny_ratio.is_finite() && self.skinny_ratio > 1.0) {
            return Err(GrpfError::InvalidParameters("skinny_ratio must be > 1"));
        }
        Ok(())
    }
}
