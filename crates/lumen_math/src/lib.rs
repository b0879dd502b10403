// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::{Ray, DELTA};
pub use vector::{MathError, MathResult, Point, Vector};

/// Tolerance used by every "is this effectively zero" decision in Lumen.
///
/// Geometry validation, intersection root filtering, point equality and the
/// camera basis checks all go through this one constant.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps `x` to exactly zero when it is within [`EPSILON`], otherwise returns it unchanged.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

/// Returns true if both values are non-zero and share a sign.
#[inline]
pub fn same_sign(a: f64, b: f64) -> bool {
    let a = align_zero(a);
    let b = align_zero(b);
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}
