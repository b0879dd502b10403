//! Lumen Core - surfaces, materials, lights and the scene aggregate.
//!
//! This crate provides:
//!
//! - **Geometry**: planes, spheres, polygons, triangles, tubes and cylinders,
//!   each answering ray intersection and surface normal queries
//! - **Shading inputs**: `Material` coefficients, `Color`, light sources
//! - **Scene**: the read-only aggregate a render traces against
//!
//! # Example
//!
//! ```
//! use lumen_core::{Material, Scene, Surface, Sphere, PointLight, Color};
//! use lumen_math::Point;
//!
//! let sphere = Sphere::new(Point::new(0.0, 0.0, -100.0), 50.0).unwrap();
//! let mut scene = Scene::new("single sphere")
//!     .with_background(Color::new(10.0, 10.0, 10.0));
//! scene.add_surface(
//!     Surface::new(sphere)
//!         .with_emission(Color::new(0.0, 0.0, 100.0))
//!         .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
//! );
//! scene.add_light(PointLight::new(Color::new(500.0, 300.0, 0.0), Point::new(-50.0, 50.0, 0.0)).into());
//! assert_eq!(scene.lights.len(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    Cylinder, Geometries, Hit, Intersectable, Plane, Polygon, Shape, Sphere, Surface, Triangle,
    Tube,
};
pub use light::{AmbientLight, AreaSampling, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Color, Material};
pub use scene::Scene;
