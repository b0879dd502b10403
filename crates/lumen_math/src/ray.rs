use crate::{is_zero, Point, Vector};

/// Distance a secondary ray's origin is pushed off its surface.
///
/// Keeps shadow, reflection and refraction rays from re-hitting the surface
/// they start on.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are immutable: the direction is normalized once on construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is moved by [`DELTA`] along `normal`, towards the side the
    /// ray travels to (the sign of `direction·normal`). A ray tangent to the
    /// surface keeps its origin.
    pub fn offset(point: Point, direction: Vector, normal: Vector) -> Self {
        let nv = direction.dot(normal);
        let origin = if is_zero(nv) {
            point
        } else {
            let shift = if nv < 0.0 { -DELTA } else { DELTA };
            Point::from_dvec3(point.to_dvec3() + normal.to_dvec3() * shift)
        };
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns the origin itself when t is (epsilon-)zero.
    pub fn at(&self, t: f64) -> Point {
        if is_zero(t) {
            return self.origin;
        }
        Point::from_dvec3(self.origin.to_dvec3() + self.direction.to_dvec3() * t)
    }
}
