//! Candidate-edge and candidate-triangle selection.
//!
//! An edge whose endpoint quadrants differ by two carries a phase reversal:
//! somewhere across it the function passes through zero or infinity. Such
//! edges, and the triangles touching them, are the candidates the refinement
//! loop keeps subdividing.

use std::collections::{HashMap, HashSet};

use grpf_core::{is_reversal, signed_jump};
use grpf_geometry::{MeshStore, MeshTriangle};

/// Signed phase jump across one mesh edge.
///
/// `jump` is `None` when either endpoint is a node vertex (zero or
/// non-finite sample); such edges never become candidates.
#[derive(Debug, Clone, Copy)]
pub struct EdgePhase {
    /// Lower vertex of the normalized edge pair.
    pub a: usize,
    /// Upper vertex of the normalized edge pair.
    pub b: usize,
    /// Signed quantized jump from `a` to `b`, in `{-1, 0, +1, +2}`.
    pub jump: Option<i32>,
}

/// Result of one selection pass over the current mesh.
#[derive(Debug, Default)]
pub struct Selection {
    /// Every mesh edge with its signed phase jump, in mesh edge order.
    pub phase_diffs: Vec<EdgePhase>,
    /// Edges whose jump is a reversal, normalized and sorted.
    pub candidate_edges: Vec<(usize, usize)>,
    /// Indices into the triangle snapshot of triangles with >= 1 candidate
    /// edge.
    pub candidate_triangles: Vec<usize>,
}

/// Walks all current edges and flags phase reversals.
#[must_use]
pub fn select(store: &MeshStore, triangles: &[MeshTriangle]) -> Selection {
    let mut phase_diffs = Vec::new();
    let mut candidate_set = HashSet::new();

    for (a, b) in store.edges() {
        let jump = signed_jump(store.quadrant(a), store.quadrant(b));
        phase_diffs.push(EdgePhase { a, b, jump });
        if jump.is_some_and(is_reversal) {
            candidate_set.insert((a, b));
        }
    }

    let mut candidate_edges: Vec<(usize, usize)> = candidate_set.iter().copied().collect();
    candidate_edges.sort_unstable();

    let candidate_triangles = triangles
        .iter()
        .enumerate()
        .filter(|(_, tri)| {
            tri.edge_keys()
                .iter()
                .any(|key| candidate_set.contains(key))
        })
        .map(|(index, _)| index)
        .collect();

    Selection {
        phase_diffs,
        candidate_edges,
        candidate_triangles,
    }
}

/// Maps every normalized edge key to the snapshot indices of its incident
/// triangles (one for hull edges, two for interior edges).
#[must_use]
pub fn edge_to_triangles(triangles: &[MeshTriangle]) -> HashMap<(usize, usize), Vec<usize>> {
    let mut map: HashMap<(usize, usize), Vec<usize>> = HashMap::with_capacity(triangles.len() * 2);
    for (index, tri) in triangles.iter().enumerate() {
        for key in tri.edge_keys() {
            map.entry(key).or_default().push(index);
        }
    }
    map
}
