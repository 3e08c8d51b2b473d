//! Mesh layer for grpf-rs.
//!
//! This crate owns everything geometric: the [`MeshStore`] wrapping the
//! incremental Delaunay triangulator with its vertex side table, owned
//! [`MeshTriangle`] snapshots with edge metrics, and the initial-domain
//! generators ([`rectangular_domain`], [`disk_domain`]).

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Simple accessors don't all need must_use
#![allow(clippy::must_use_candidate)]

pub mod domain;
pub mod mesh;
pub mod triangle;

pub use domain::{disk_domain, rectangular_domain};
pub use mesh::{MeshStore, VertexSample};
pub use triangle::{edge_key, MeshTriangle};
