//! Infinite plane primitive.

use lumen_math::{align_zero, is_zero, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// An infinite plane through a point with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point,
    normal: Vector,
}

impl Plane {
    /// Create a plane from a point on it and its normal. The normal is normalized.
    pub fn new(point: Point, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(b − a) × (c − a)`, normalized.
    pub fn from_points(a: Point, b: Point, c: Point) -> GeometryResult<Self> {
        let ab = b.subtract(a).map_err(|_| GeometryError::CoincidentPoints)?;
        let ac = c.subtract(a).map_err(|_| GeometryError::CoincidentPoints)?;
        if b == c {
            return Err(GeometryError::CoincidentPoints);
        }
        let normal = ab.cross(ac).map_err(|_| GeometryError::CollinearPoints)?;
        Ok(Self::new(a, normal))
    }

    /// Reference point the plane was built from.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Unit normal, the same everywhere on the plane.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// The single crossing point with distance in `(0, max_distance]`, if any.
    ///
    /// Rays parallel to the plane (including rays lying in it) miss.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let nv = align_zero(self.normal.dot(ray.direction()));
        if nv == 0.0 {
            return None;
        }
        // Origin on the plane
        let Ok(q) = self.point.subtract(ray.origin()) else {
            return None;
        };
        let t = align_zero(self.normal.dot(q) / nv);
        if is_zero(t) || !Interval::ray(max_distance).admits(t) {
            return None;
        }
        Some(ray.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let plane = Plane::from_points(
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let expected = Vector::new(1.0, 1.0, 1.0).unwrap().normalize();

        assert!(plane.normal() == expected || plane.normal() == -expected);
        assert!((plane.normal().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_points_rejects_degenerate_input() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(2.0, 4.0, 6.0);
        let c = Point::new(3.0, 6.0, 9.0);

        assert_eq!(Plane::from_points(a, a, c), Err(GeometryError::CoincidentPoints));
        assert_eq!(Plane::from_points(a, b, a), Err(GeometryError::CoincidentPoints));
        assert_eq!(Plane::from_points(a, b, b), Err(GeometryError::CoincidentPoints));
        assert_eq!(Plane::from_points(a, b, c), Err(GeometryError::CollinearPoints));
    }

    #[test]
    fn test_ray_crosses_plane() {
        let plane = Plane::from_points(
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        let ray = Ray::new(Point::new(0.0, 0.0, 4.0), Vector::new(-4.0, 0.0, -4.0).unwrap());

        assert_eq!(plane.intersect(&ray, f64::INFINITY), Some(Point::new(-3.0, 0.0, 1.0)));
    }

    #[test]
    fn test_ray_misses_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);

        // Pointing away
        let away = Ray::new(Point::ZERO, Vector::NEG_Z);
        assert_eq!(plane.intersect(&away, f64::INFINITY), None);

        // Parallel, off the plane
        let parallel = Ray::new(Point::ZERO, Vector::X);
        assert_eq!(plane.intersect(&parallel, f64::INFINITY), None);

        // Lying in the plane
        let inside = Ray::new(Point::new(2.0, 0.0, 1.0), Vector::Y);
        assert_eq!(plane.intersect(&inside, f64::INFINITY), None);
    }

    #[test]
    fn test_ray_starts_on_plane() {
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z);

        // At the reference point
        let at_reference = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::new(1.0, 0.0, 1.0).unwrap());
        assert_eq!(plane.intersect(&at_reference, f64::INFINITY), None);

        // Elsewhere on the plane
        let elsewhere = Ray::new(Point::new(3.0, 2.0, 1.0), Vector::new(1.0, 0.0, -1.0).unwrap());
        assert_eq!(plane.intersect(&elsewhere, f64::INFINITY), None);
    }

    #[test]
    fn test_max_distance() {
        let plane = Plane::new(Point::new(0.0, 0.0, 2.0), Vector::Z);
        let ray = Ray::new(Point::ZERO, Vector::Z);

        assert_eq!(plane.intersect(&ray, 1.0), None);
        assert_eq!(plane.intersect(&ray, 2.0), Some(Point::new(0.0, 0.0, 2.0)));
    }
}
