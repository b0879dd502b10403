//! Construction-time geometry errors.

use lumen_math::MathError;
use thiserror::Error;

/// Errors that can occur while building a surface.
///
/// All of them are configuration errors: a surface that constructs
/// successfully never fails during rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Vector error: {0}")]
    Math(#[from] MathError),

    #[error("Plane points must be distinct")]
    CoincidentPoints,

    #[error("Plane points must not lie on one line")]
    CollinearPoints,

    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Polygon vertex {0} does not lie in the plane of the first three")]
    NonPlanarVertex(usize),

    #[error("Polygon vertices must be ordered and convex (violated at vertex {0})")]
    NonConvex(usize),

    #[error("Radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("Height must be positive, got {0}")]
    InvalidHeight(f64),
}

/// Result type for surface construction.
pub type GeometryResult<T> = Result<T, GeometryError>;
