//! Error types for grpf-rs.

use thiserror::Error;

/// The main error type for grpf-rs operations.
#[derive(Error, Debug)]
pub enum GrpfError {
    /// The initial domain contains no sample points.
    #[error("initial domain is empty - at least one sample point is required")]
    EmptyDomain,

    /// The initial domain spans no area (identical or collinear points).
    #[error("initial domain is degenerate: {0}")]
    DegenerateDomain(&'static str),

    /// A mapped point left the triangulator's admissible square.
    #[error("mapped point ({x}, {y}) is outside the admissible square")]
    OutOfRange { x: f64, y: f64 },

    /// A parameter failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// The underlying triangulator rejected an insertion.
    #[error("triangulation failed: {0}")]
    Triangulation(#[from] spade::InsertionError),
}

/// A specialized Result type for grpf-rs operations.
pub type Result<T> = std::result::Result<T, GrpfError>;
