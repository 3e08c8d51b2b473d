//! Triangle snapshots and their edge metrics.

use glam::DVec2;

/// Normalizes an unordered vertex pair so it can be used as a map key.
#[inline]
#[must_use]
pub fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// One triangle of the tessellation, captured as an owned snapshot.
///
/// The refinement engine mutates the mesh while it works, so triangles are
/// copied out of the triangulator per iteration rather than borrowed.
#[derive(Debug, Clone, Copy)]
pub struct MeshTriangle {
    /// Vertex identities, in tessellation order.
    pub vertices: [usize; 3],
    /// Mapped (admissible-square) positions of the three vertices.
    pub positions: [DVec2; 3],
}

impl MeshTriangle {
    /// The three undirected edges, as normalized vertex-pair keys.
    #[must_use]
    pub fn edge_keys(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [edge_key(a, b), edge_key(b, c), edge_key(c, a)]
    }

    /// Lengths of the three edges in mapped coordinates, in the same order
    /// as [`edge_keys`](MeshTriangle::edge_keys).
    #[must_use]
    pub fn edge_lengths(&self) -> [f64; 3] {
        let [p, q, r] = self.positions;
        [p.distance(q), q.distance(r), r.distance(p)]
    }

    /// Longest edge length in mapped coordinates.
    #[must_use]
    pub fn longest_edge(&self) -> f64 {
        self.edge_lengths().into_iter().fold(0.0, f64::max)
    }

    /// Longest-to-shortest edge ratio. A large ratio marks a sliver.
    #[must_use]
    pub fn elongation(&self) -> f64 {
        let lengths = self.edge_lengths();
        let longest = lengths.into_iter().fold(0.0, f64::max);
        let shortest = lengths.into_iter().fold(f64::INFINITY, f64::min);
        if shortest > 0.0 {
            longest / shortest
        } else {
            f64::INFINITY
        }
    }

    /// Midpoints of the three edges, in mapped coordinates.
    #[must_use]
    pub fn edge_midpoints(&self) -> [DVec2; 3] {
        let [p, q, r] = self.positions;
        [(p + q) * 0.5, (q + r) * 0.5, (r + p) * 0.5]
    }
}
