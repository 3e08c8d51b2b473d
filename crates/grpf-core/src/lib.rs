//! Core abstractions for grpf-rs.
//!
//! This crate provides the fundamental types used throughout grpf-rs:
//! - [`Parameters`] controlling the refinement loop
//! - [`Quadrant`] phase quantization and signed phase jumps
//! - [`Mapper`] between user coordinates and the triangulator's admissible
//!   square
//! - The crate-wide [`GrpfError`] / [`Result`] pair

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Simple accessors don't all need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod mapping;
pub mod params;
pub mod quadrant;

pub use error::{GrpfError, Result};
pub use mapping::{Mapper, MAX_COORD, MIN_COORD};
pub use params::Parameters;
pub use quadrant::{is_reversal, signed_jump, Quadrant};

// Re-export the math types used at the API surface
pub use glam::DVec2;
pub use num_complex::Complex64;
