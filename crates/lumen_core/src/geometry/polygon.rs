//! Convex planar polygons and triangles.
//!
//! A ray hits a polygon when it hits the supporting plane and the crossing
//! lies strictly inside every edge. The edge test works in ray space: with
//! `v_i` the vector from the ray origin to vertex `i`, the ray is inside when
//! `(v_i × v_{i+1})·dir` has the same sign for every edge. A zero anywhere
//! means the ray passes through an edge or a vertex, which counts as a miss.

use lumen_math::{is_zero, same_sign, DVec3, Point, Ray, Vector};

use super::Plane;
use crate::error::{GeometryError, GeometryResult};

/// A convex polygon with at least three coplanar vertices in edge order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon from vertices listed along its boundary.
    ///
    /// The supporting plane comes from the first three vertices. Fails for
    /// fewer than three vertices, repeated consecutive vertices, three
    /// consecutive vertices on one line, vertices off the plane, and concave
    /// or mis-ordered vertex lists.
    pub fn new(vertices: &[Point]) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let polygon = Self {
            vertices: vertices.to_vec(),
            plane,
        };
        if vertices.len() == 3 {
            return Ok(polygon);
        }

        let n = plane.normal().to_dvec3();
        let first = vertices[0].to_dvec3();
        for (i, vertex) in vertices.iter().enumerate().skip(3) {
            if !is_zero((vertex.to_dvec3() - first).dot(n)) {
                return Err(GeometryError::NonPlanarVertex(i));
            }
        }

        // Every corner must turn the same way around the normal
        let edge = |from: Point, to: Point| -> GeometryResult<Vector> {
            to.subtract(from).map_err(|_| GeometryError::CoincidentPoints)
        };
        let turns_positive = |e1: Vector, e2: Vector| -> GeometryResult<bool> {
            let corner = e1.cross(e2).map_err(|_| GeometryError::CollinearPoints)?;
            Ok(corner.to_dvec3().dot(n) > 0.0)
        };

        let last = vertices.len() - 1;
        let mut e1;
        let mut e2 = edge(vertices[last], vertices[0])?;
        let positive = turns_positive(edge(vertices[last - 1], vertices[last])?, e2)?;
        for i in 1..vertices.len() {
            e1 = e2;
            e2 = edge(vertices[i - 1], vertices[i])?;
            if turns_positive(e1, e2)? != positive {
                return Err(GeometryError::NonConvex(i - 1));
            }
        }

        Ok(polygon)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Unit normal of the supporting plane.
    pub fn normal(&self) -> Vector {
        self.plane.normal()
    }

    /// The crossing point with distance in `(0, max_distance]`, if it lies
    /// strictly inside the polygon.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let point = self.plane.intersect(ray, max_distance)?;

        let origin = ray.origin().to_dvec3();
        let dir = ray.direction().to_dvec3();
        let to_vertex: Vec<DVec3> = self
            .vertices
            .iter()
            .map(|v| v.to_dvec3() - origin)
            .collect();

        let count = to_vertex.len();
        let signs: Vec<f64> = (0..count)
            .map(|i| to_vertex[i].cross(to_vertex[(i + 1) % count]).dot(dir))
            .collect();

        let inside = (0..count).all(|i| same_sign(signs[i], signs[(i + 1) % count]));
        inside.then_some(point)
    }
}

/// A triangle: a three-vertex [`Polygon`].
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    /// Create a triangle. Fails for coincident or collinear vertices.
    pub fn new(a: Point, b: Point, c: Point) -> GeometryResult<Self> {
        Polygon::new(&[a, b, c]).map(Self)
    }

    pub fn vertices(&self) -> &[Point] {
        self.0.vertices()
    }

    pub fn normal(&self) -> Vector {
        self.0.normal()
    }

    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        self.0.intersect(ray, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: Point = Point::new(1.0, 0.0, 0.0);
    const P2: Point = Point::new(0.0, 1.0, 0.0);
    const P3: Point = Point::new(0.0, 0.0, 1.0);
    const P4: Point = Point::new(-1.0, 1.0, 1.0);

    fn octagon() -> Polygon {
        Polygon::new(&[
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 1.0),
            Point::new(3.0, 0.0, 2.0),
            Point::new(2.0, 0.0, 3.0),
            Point::new(1.0, 0.0, 3.0),
            Point::new(0.0, 0.0, 2.0),
            Point::new(0.0, 0.0, 1.0),
        ])
        .unwrap()
    }

    fn triangle() -> Triangle {
        Triangle::new(
            Point::new(-6.0, 0.0, 0.0),
            Point::new(-2.0, 0.0, 0.0),
            Point::new(-4.0, -3.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_quad() {
        assert!(Polygon::new(&[P3, P1, P2, P4]).is_ok());
    }

    #[test]
    fn test_too_few_vertices() {
        assert_eq!(Polygon::new(&[P1, P2]), Err(GeometryError::TooFewVertices(2)));
        assert_eq!(Polygon::new(&[]), Err(GeometryError::TooFewVertices(0)));
    }

    #[test]
    fn test_wrong_vertex_order() {
        assert!(matches!(
            Polygon::new(&[P3, P2, P1, P4]),
            Err(GeometryError::NonConvex(_))
        ));
    }

    #[test]
    fn test_vertex_off_plane() {
        assert_eq!(
            Polygon::new(&[P3, P1, P2, Point::new(0.0, 2.0, 2.0)]),
            Err(GeometryError::NonPlanarVertex(3))
        );
    }

    #[test]
    fn test_concave_polygon() {
        let dented = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(2.0, 2.0, 0.0),
            Point::new(1.0, 0.5, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        assert!(matches!(
            Polygon::new(&dented),
            Err(GeometryError::NonConvex(_))
        ));
    }

    #[test]
    fn test_vertex_on_a_side() {
        assert_eq!(
            Polygon::new(&[P3, P1, P2, Point::new(0.0, 0.5, 0.5)]),
            Err(GeometryError::CollinearPoints)
        );
    }

    #[test]
    fn test_repeated_vertices() {
        // Last vertex closes back onto the first
        assert_eq!(
            Polygon::new(&[P3, P1, P2, P3]),
            Err(GeometryError::CoincidentPoints)
        );
        // Two consecutive vertices at the same spot
        assert_eq!(
            Polygon::new(&[P3, P1, P2, Point::new(0.0, 1.0, 0.0)]),
            Err(GeometryError::CoincidentPoints)
        );
    }

    #[test]
    fn test_degenerate_triangle() {
        assert_eq!(
            Triangle::new(P1, P1, P2),
            Err(GeometryError::CoincidentPoints)
        );
        assert_eq!(
            Triangle::new(Point::ZERO, P1, Point::new(2.0, 0.0, 0.0)),
            Err(GeometryError::CollinearPoints)
        );
    }

    #[test]
    fn test_normal_is_orthogonal_to_edges() {
        let pts = [P3, P1, P2, P4];
        let polygon = Polygon::new(&pts).unwrap();
        let n = polygon.normal();

        assert!((n.length() - 1.0).abs() < 1e-9);
        for i in 0..pts.len() {
            let prev = pts[(i + pts.len() - 1) % pts.len()];
            let edge = pts[i].subtract(prev).unwrap();
            assert!(n.dot(edge).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ray_inside_polygon() {
        let head = Point::new(1.0, -2.0, 0.0);
        let ray = Ray::new(head, Vector::new(0.0, 2.0, 1.0).unwrap());
        assert_eq!(
            octagon().intersect(&ray, f64::INFINITY),
            Some(Point::new(1.0, 0.0, 1.0))
        );
        // Too far away
        assert_eq!(octagon().intersect(&ray, 1.0), None);
    }

    #[test]
    fn test_ray_outside_polygon() {
        let head = Point::new(1.0, -2.0, 0.0);
        let polygon = octagon();

        // Opposite a side
        let ray = Ray::new(head, Vector::new(2.5, 2.0, -0.5).unwrap());
        assert_eq!(polygon.intersect(&ray, f64::INFINITY), None);

        // Opposite a vertex
        let ray = Ray::new(head, Vector::new(3.0, 2.0, -1.0).unwrap());
        assert_eq!(polygon.intersect(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_ray_on_polygon_boundary() {
        let head = Point::new(1.0, -2.0, 0.0);
        let polygon = octagon();

        // On a side, at (1.5, 0, 0)
        let ray = Ray::new(head, Vector::new(0.5, 2.0, 0.0).unwrap());
        assert_eq!(polygon.intersect(&ray, f64::INFINITY), None);

        // On a vertex, at (3, 0, 1)
        let ray = Ray::new(head, Vector::new(2.0, 2.0, 1.0).unwrap());
        assert_eq!(polygon.intersect(&ray, f64::INFINITY), None);

        // On the continuation of a side, at (4, 0, 0)
        let ray = Ray::new(head, Vector::new(3.0, 2.0, 0.0).unwrap());
        assert_eq!(polygon.intersect(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_ray_inside_triangle() {
        let ray = Ray::new(Point::new(0.0, 0.0, 4.0), Vector::new(-4.0, -1.0, -4.0).unwrap());
        assert_eq!(
            triangle().intersect(&ray, f64::INFINITY),
            Some(Point::new(-4.0, -1.0, 0.0))
        );
    }

    #[test]
    fn test_ray_outside_triangle() {
        let ray = Ray::new(Point::new(0.0, 0.0, 4.0), Vector::new(-1.0, -1.0, -4.0).unwrap());
        assert_eq!(triangle().intersect(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_ray_through_triangle_vertex_or_edge() {
        let head = Point::new(0.0, 0.0, 4.0);

        // Through the vertex (-6, 0, 0)
        let ray = Ray::new(head, Vector::new(-6.0, 0.0, -4.0).unwrap());
        assert_eq!(triangle().intersect(&ray, f64::INFINITY), None);

        // Through the edge midpoint (-4, 0, 0)
        let ray = Ray::new(head, Vector::new(-4.0, 0.0, -4.0).unwrap());
        assert_eq!(triangle().intersect(&ray, f64::INFINITY), None);
    }
}
