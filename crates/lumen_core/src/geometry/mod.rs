//! Surfaces, hits and the intersection protocol.
//!
//! Shapes are a closed set ([`Shape`]) matched explicitly. A [`Surface`]
//! pairs a shape with its material and emission. The [`Intersectable`] trait
//! is the seam used where heterogeneous children are stored: the
//! [`Geometries`] composite holds surfaces and nested composites alike.

mod plane;
mod polygon;
mod sphere;
mod tube;

pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::{Cylinder, Tube};

use lumen_math::{Point, Ray, Vector};

use crate::material::{Color, Material};

/// Record of a ray-surface intersection.
///
/// Two hits compare equal when their points are equal (within tolerance),
/// whichever surfaces produced them. Two surfaces touching at one point
/// therefore yield hits that compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Surface that was hit
    pub surface: &'a Surface,
    /// Point of intersection
    pub point: Point,
    /// Distance from the ray origin to `point`
    pub distance: f64,
}

impl<'a> Hit<'a> {
    pub fn new(surface: &'a Surface, point: Point, ray: &Ray) -> Self {
        Self {
            surface,
            point,
            distance: point.distance(ray.origin()),
        }
    }

    /// Unit surface normal at the hit point.
    pub fn normal(&self) -> Vector {
        self.surface.normal_at(self.point)
    }
}

impl PartialEq for Hit<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

/// Pick the hit nearest to its ray's origin.
///
/// Ties keep the earliest hit in the list, so the result is deterministic for
/// a fixed scene.
pub fn closest<'a>(hits: Vec<Hit<'a>>) -> Option<Hit<'a>> {
    hits.into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All intersections with a distance in `(0, max_distance]`.
    fn find_intersections<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>>;

    /// All intersections in front of the ray origin.
    fn find_all<'a>(&'a self, ray: &Ray) -> Vec<Hit<'a>> {
        self.find_intersections(ray, f64::INFINITY)
    }

    /// Nearest intersection in `(0, max_distance]`.
    fn closest_hit<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Hit<'a>> {
        closest(self.find_intersections(ray, max_distance))
    }
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Polygon(Polygon),
    Triangle(Triangle),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Unit normal at a point on the shape.
    pub fn normal_at(&self, point: Point) -> Vector {
        match self {
            Shape::Plane(plane) => plane.normal(),
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Polygon(polygon) => polygon.normal(),
            Shape::Triangle(triangle) => triangle.normal(),
            Shape::Tube(tube) => tube.normal_at(point),
            Shape::Cylinder(cylinder) => cylinder.normal_at(point),
        }
    }

    /// Intersection points with a distance in `(0, max_distance]`, nearest first.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point> {
        match self {
            Shape::Plane(plane) => plane.intersect(ray, max_distance).into_iter().collect(),
            Shape::Sphere(sphere) => sphere.intersect(ray, max_distance),
            Shape::Polygon(polygon) => polygon.intersect(ray, max_distance).into_iter().collect(),
            Shape::Triangle(triangle) => triangle.intersect(ray, max_distance).into_iter().collect(),
            Shape::Tube(tube) => tube.intersect(ray, max_distance),
            Shape::Cylinder(cylinder) => cylinder.intersect(ray, max_distance),
        }
    }
}

macro_rules! impl_into_shape {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Shape {
                fn from(shape: $kind) -> Self {
                    Shape::$kind(shape)
                }
            }
        )*
    };
}

impl_into_shape!(Plane, Sphere, Polygon, Triangle, Tube, Cylinder);

/// A shape with a material and an emitted color.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Surface {
    /// Create a black, non-emissive surface.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            emission: Color::ZERO,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Unit normal at a point on the surface.
    pub fn normal_at(&self, point: Point) -> Vector {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Surface {
    fn find_intersections<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.shape
            .intersect(ray, max_distance)
            .into_iter()
            .map(|point| Hit::new(self, point, ray))
            .collect()
    }
}

/// A composite of intersectables.
///
/// Every query scans every child: cost is linear in the number of surfaces.
#[derive(Default)]
pub struct Geometries {
    children: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child (a surface or another composite).
    pub fn add(&mut self, child: impl Intersectable + 'static) {
        self.children.push(Box::new(child));
    }

    /// Builder form of [`Geometries::add`].
    pub fn with(mut self, child: impl Intersectable + 'static) -> Self {
        self.add(child);
        self
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the composite has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Intersectable for Geometries {
    fn find_intersections<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        let mut hits = Vec::new();
        for child in &self.children {
            hits.extend(child.find_intersections(ray, max_distance));
        }
        hits
    }
}

impl std::fmt::Debug for Geometries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geometries")
            .field("children", &self.children.len())
            .finish()
    }
}
