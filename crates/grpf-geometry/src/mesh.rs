//! Incremental Delaunay mesh with per-vertex function samples.
//!
//! Wraps the triangulator behind a narrow interface: append points, snapshot
//! triangles and edges, look up per-vertex data. Function values and quadrant
//! labels live in a side table keyed by vertex identity, so the triangulator
//! itself stays a black box. Vertex identities are dense indices that grow
//! monotonically; vertices are never removed.

use std::collections::HashSet;

use glam::DVec2;
use num_complex::Complex64;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use grpf_core::{GrpfError, Mapper, Quadrant, Result};

use crate::triangle::{edge_key, MeshTriangle};

/// Snap grid used to collapse nearly-coincident insertion points.
///
/// The admissible square has side length one, so this is an absolute
/// resolution well below any edge the refinement loop can produce, while
/// still a couple of orders of magnitude above the round-off of coordinates
/// near 1.5.
const SNAP: f64 = 1e-14;

/// Function value and quadrant label of an evaluated vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexSample {
    /// f(z) at the vertex, narrowed to double precision.
    pub value: Complex64,
    /// Quantized phase of `value`.
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy)]
struct VertexEntry {
    user: Complex64,
    mapped: DVec2,
    sample: Option<VertexSample>,
}

/// The evolving Delaunay mesh plus its vertex side table.
pub struct MeshStore {
    tess: DelaunayTriangulation<Point2<f64>>,
    mapper: Mapper,
    entries: Vec<VertexEntry>,
    occupied: HashSet<(i64, i64)>,
}

impl MeshStore {
    /// Creates an empty mesh over the given mapper.
    ///
    /// `sizehint` pre-allocates vertex storage (the triangulator grows an
    /// edge and face table roughly 3x and 2x the vertex count).
    #[must_use]
    pub fn new(mapper: Mapper, sizehint: usize) -> Self {
        Self {
            tess: DelaunayTriangulation::with_capacity(sizehint, 3 * sizehint, 2 * sizehint),
            mapper,
            entries: Vec::with_capacity(sizehint),
            occupied: HashSet::with_capacity(sizehint),
        }
    }

    /// The coordinate mapper this mesh was built over.
    #[must_use]
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Number of vertices currently in the mesh.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of triangles currently in the mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.tess.num_inner_faces()
    }

    /// Appends points given in mapped (admissible-square) coordinates.
    ///
    /// Points that fall on the snap grid cell of an existing vertex are
    /// silently dropped. Returns the identities of the vertices actually
    /// created, in insertion order.
    ///
    /// # Errors
    ///
    /// [`GrpfError::OutOfRange`] if a point is outside the admissible square;
    /// [`GrpfError::Triangulation`] if the triangulator rejects a point.
    pub fn insert_mapped(&mut self, points: &[DVec2]) -> Result<Vec<usize>> {
        let mut added = Vec::with_capacity(points.len());
        for &p in points {
            if !Mapper::is_admissible(p) {
                return Err(GrpfError::OutOfRange { x: p.x, y: p.y });
            }
            if !self.occupied.insert(snap_key(p)) {
                continue;
            }
            let handle = self.tess.insert(Point2::new(p.x, p.y))?;
            let index = handle.index();
            if index < self.entries.len() {
                log::debug!("triangulator collapsed ({}, {}) onto vertex {index}", p.x, p.y);
                continue;
            }
            self.entries.push(VertexEntry {
                user: self.mapper.unmap(p),
                mapped: p,
                sample: None,
            });
            added.push(index);
        }
        Ok(added)
    }

    /// Appends points given in user coordinates.
    pub fn insert_user_points(&mut self, points: &[Complex64]) -> Result<Vec<usize>> {
        let mapped: Vec<DVec2> = points.iter().map(|&z| self.mapper.map(z)).collect();
        self.insert_mapped(&mapped)
    }

    /// User-plane position of a vertex.
    #[must_use]
    pub fn user_position(&self, vertex: usize) -> Complex64 {
        self.entries[vertex].user
    }

    /// Mapped position of a vertex.
    #[must_use]
    pub fn mapped_position(&self, vertex: usize) -> DVec2 {
        self.entries[vertex].mapped
    }

    /// The function sample stored for a vertex, if it has been evaluated.
    #[must_use]
    pub fn sample(&self, vertex: usize) -> Option<&VertexSample> {
        self.entries[vertex].sample.as_ref()
    }

    /// Quadrant label of a vertex. Unevaluated vertices report
    /// [`Quadrant::Node`]; the engine evaluates every vertex before any
    /// selection pass, so this only matters for out-of-order inspection.
    #[must_use]
    pub fn quadrant(&self, vertex: usize) -> Quadrant {
        self.entries[vertex]
            .sample
            .map_or(Quadrant::Node, |s| s.quadrant)
    }

    /// Stores the evaluation result for a vertex. Each slot is written once.
    pub fn set_sample(&mut self, vertex: usize, sample: VertexSample) {
        debug_assert!(self.entries[vertex].sample.is_none());
        self.entries[vertex].sample = Some(sample);
    }

    /// Identities of vertices that have not been evaluated yet.
    #[must_use]
    pub fn pending_vertices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.sample.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Owned snapshot of the current triangles.
    #[must_use]
    pub fn triangles(&self) -> Vec<MeshTriangle> {
        self.tess
            .inner_faces()
            .map(|face| {
                let vs = face.vertices();
                MeshTriangle {
                    vertices: [
                        vs[0].fix().index(),
                        vs[1].fix().index(),
                        vs[2].fix().index(),
                    ],
                    positions: [
                        to_dvec2(vs[0].position()),
                        to_dvec2(vs[1].position()),
                        to_dvec2(vs[2].position()),
                    ],
                }
            })
            .collect()
    }

    /// Owned snapshot of the current undirected edges, each pair normalized
    /// and enumerated exactly once.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.tess
            .undirected_edges()
            .map(|edge| {
                let [a, b] = edge.vertices();
                edge_key(a.fix().index(), b.fix().index())
            })
            .collect()
    }

    /// Per-vertex quadrant labels, indexed by vertex identity.
    #[must_use]
    pub fn quadrants(&self) -> Vec<Quadrant> {
        self.entries
            .iter()
            .map(|e| e.sample.map_or(Quadrant::Node, |s| s.quadrant))
            .collect()
    }
}

#[inline]
fn to_dvec2(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn snap_key(p: DVec2) -> (i64, i64) {
    ((p.x / SNAP).round() as i64, (p.y / SNAP).round() as i64)
}
