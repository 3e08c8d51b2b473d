//! grpf-rs: global complex root and pole finding.
//!
//! Locates all zeros and poles of an analytic (or meromorphic) function
//! inside a bounded region of the complex plane, without derivatives or
//! contour integration. The method samples the function on a Delaunay mesh,
//! quantizes the phase at each vertex into four quadrants, and adaptively
//! refines wherever the phase reverses across an edge; the surviving regions
//! are classified as roots or poles by a discrete argument principle.
//!
//! # Quick Start
//!
//! ```
//! use grpf::{grpf, rectangular_domain, Complex64, Parameters};
//!
//! fn main() -> grpf::Result<()> {
//!     // f(z) = z^2 + 1 on [-2, 2] x [-2, 2]
//!     let points = rectangular_domain(
//!         Complex64::new(-2.0, -2.0),
//!         Complex64::new(2.0, 2.0),
//!         0.15,
//!     );
//!     let params = Parameters {
//!         tolerance: 1e-6,
//!         ..Parameters::default()
//!     };
//!     let result = grpf(|z| z * z + 1.0, &points, &params)?;
//!     println!("roots: {:?}", result.roots); // close to +i and -i
//!     println!("poles: {:?}", result.poles); // empty
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `grpf-core` holds the parameter record, the quadrant model, and the
//!   coordinate mapper into the triangulator's admissible square.
//! - `grpf-geometry` owns the incremental Delaunay mesh and the
//!   initial-domain generators.
//! - This crate drives the engine: evaluation, candidate selection, the
//!   refinement loop, and contour classification.

// Arithmetic on mesh indices and winding counts stays well inside the lossy
// ranges these lints guard against.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Simple accessors don't all need must_use
#![allow(clippy::must_use_candidate)]

pub mod contour;
pub mod evaluate;
pub mod plot;
pub mod refine;
pub mod select;

use serde::{Deserialize, Serialize};

// Re-export the core and geometry surface
pub use grpf_core::{
    is_reversal, signed_jump, Complex64, DVec2, GrpfError, Mapper, Parameters, Quadrant, Result,
    MAX_COORD, MIN_COORD,
};
pub use grpf_geometry::{
    disk_domain, edge_key, rectangular_domain, MeshStore, MeshTriangle, VertexSample,
};

pub use contour::Region;
pub use plot::PlotData;
pub use refine::Outcome;
pub use select::{EdgePhase, Selection};

/// Roots and poles found by a [`grpf`] run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrpfResult {
    /// Locations with positive winding, in region discovery order.
    pub roots: Vec<Complex64>,
    /// Locations with negative winding, in region discovery order.
    pub poles: Vec<Complex64>,
    /// How the refinement loop ended.
    pub outcome: Outcome,
    /// Number of selection passes performed.
    pub iterations: usize,
    /// Final mesh size.
    pub vertex_count: usize,
}

/// Internal state of a finished run, for plotting and inspection.
///
/// This is the extended return form: per-vertex quadrants, per-edge signed
/// phase jumps, the classified regions with their winding numbers, and the
/// final mesh (whose [`Mapper`](grpf_core::Mapper) converts mapped
/// coordinates back to user coordinates).
pub struct Diagnostics {
    /// Quadrant label per vertex, indexed by vertex identity.
    pub quadrants: Vec<Quadrant>,
    /// Signed phase jump per mesh edge, from the final selection pass.
    pub phase_diffs: Vec<EdgePhase>,
    /// Classified candidate regions, including winding magnitudes.
    pub regions: Vec<Region>,
    /// The final mesh with its side tables and coordinate mapper.
    pub mesh: MeshStore,
}

impl Diagnostics {
    /// The coordinate mapper of the run.
    #[must_use]
    pub fn mapper(&self) -> &Mapper {
        self.mesh.mapper()
    }
}

/// Finds all roots and poles of `f` inside the region sampled by
/// `origcoords`.
///
/// `origcoords` seeds the initial mesh; its bounding rectangle defines the
/// coordinate mapping, and every returned location lies inside it. The
/// function may return non-finite values or panic (both are absorbed as node
/// vertices); it must be pure and reentrant when
/// [`Parameters::multithreading`] is enabled.
///
/// # Errors
///
/// [`GrpfError::EmptyDomain`] / [`GrpfError::DegenerateDomain`] for unusable
/// `origcoords`, [`GrpfError::InvalidParameters`] for out-of-range
/// parameters, [`GrpfError::Triangulation`] if the triangulator fails.
/// Hitting `max_iterations` or `max_nodes` is not an error: the run returns
/// best-effort results with the corresponding [`Outcome`] and a logged
/// warning.
pub fn grpf<F>(f: F, origcoords: &[Complex64], params: &Parameters) -> Result<GrpfResult>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let (result, _) = run_engine(f, origcoords, params)?;
    Ok(result)
}

/// Like [`grpf`], but also returns the final engine state for plotting.
pub fn grpf_with_diagnostics<F>(
    f: F,
    origcoords: &[Complex64],
    params: &Parameters,
) -> Result<(GrpfResult, Diagnostics)>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    run_engine(f, origcoords, params)
}

fn run_engine<F>(
    f: F,
    origcoords: &[Complex64],
    params: &Parameters,
) -> Result<(GrpfResult, Diagnostics)>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    params.validate()?;
    if origcoords.is_empty() {
        return Err(GrpfError::EmptyDomain);
    }
    if params.max_nodes < origcoords.len() {
        return Err(GrpfError::InvalidParameters(
            "max_nodes must be at least the initial vertex count",
        ));
    }

    let mapper = Mapper::from_points(origcoords)?;
    let mut store = MeshStore::new(mapper, params.tess_sizehint.max(origcoords.len()));
    store.insert_user_points(origcoords)?;
    if store.triangle_count() == 0 {
        return Err(GrpfError::DegenerateDomain("initial points are collinear"));
    }

    let (outcome, iterations) = refine::run(&mut store, &f, params)?;

    let triangles = store.triangles();
    let selection = select::select(&store, &triangles);
    let regions = contour::classify_regions(&store, &triangles, &selection.candidate_edges);

    let mut roots = Vec::new();
    let mut poles = Vec::new();
    for region in &regions {
        if region.winding > 0 {
            roots.push(region.location);
        } else {
            poles.push(region.location);
        }
    }

    log::info!(
        "found {} roots and {} poles in {} passes over {} vertices ({:?})",
        roots.len(),
        poles.len(),
        iterations,
        store.vertex_count(),
        outcome
    );

    let result = GrpfResult {
        roots,
        poles,
        outcome,
        iterations,
        vertex_count: store.vertex_count(),
    };
    let diagnostics = Diagnostics {
        quadrants: store.quadrants(),
        phase_diffs: selection.phase_diffs,
        regions,
        mesh: store,
    };
    Ok((result, diagnostics))
}
