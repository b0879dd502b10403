//! Sphere primitive.

use lumen_math::{align_zero, is_zero, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> GeometryResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward unit normal at a point on the sphere.
    ///
    /// The center has no outward direction; it reports `+Z`.
    pub fn normal_at(&self, point: Point) -> Vector {
        point
            .subtract(self.center)
            .map(Vector::normalize)
            .unwrap_or(Vector::Z)
    }

    /// Intersection points with distance in `(0, max_distance]`, nearest first.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point> {
        let range = Interval::ray(max_distance);

        // Ray starting at the center leaves through exactly one point
        let Ok(u) = self.center.subtract(ray.origin()) else {
            return if range.admits(self.radius) {
                vec![ray.at(self.radius)]
            } else {
                Vec::new()
            };
        };

        let tm = ray.direction().dot(u);
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = align_zero(self.radius * self.radius - d_squared);
        if th_squared < 0.0 {
            return Vec::new();
        }

        let th = th_squared.sqrt();
        if is_zero(th) {
            return if range.admits(tm) {
                vec![ray.at(tm)]
            } else {
                Vec::new()
            };
        }

        [tm - th, tm + th]
            .into_iter()
            .filter(|&t| range.admits(t))
            .map(|t| ray.at(t))
            .collect()
    }
}
