//! Projection of engine state back to user coordinates for visualization.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use grpf_core::Quadrant;

use crate::Diagnostics;

/// Everything needed to draw a phase portrait of the final mesh: vertices in
/// user coordinates with their quadrant labels, and edge index pairs with
/// their signed phase jumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotData {
    /// Vertex positions in user coordinates, indexed by vertex identity.
    pub vertices: Vec<Complex64>,
    /// Quadrant label per vertex.
    pub quadrants: Vec<Quadrant>,
    /// Mesh edges as index pairs into `vertices`.
    pub edges: Vec<(usize, usize)>,
    /// Signed phase jump per edge, parallel to `edges`; `None` on edges
    /// touching a node vertex.
    pub phase_jumps: Vec<Option<i32>>,
}

impl PlotData {
    /// Extracts plot data from a finished run.
    #[must_use]
    pub fn from_diagnostics(diagnostics: &Diagnostics) -> Self {
        let mesh = &diagnostics.mesh;
        Self {
            vertices: (0..mesh.vertex_count())
                .map(|v| mesh.user_position(v))
                .collect(),
            quadrants: diagnostics.quadrants.clone(),
            edges: diagnostics.phase_diffs.iter().map(|e| (e.a, e.b)).collect(),
            phase_jumps: diagnostics.phase_diffs.iter().map(|e| e.jump).collect(),
        }
    }
}
