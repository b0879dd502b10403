//! The scene a render traces against.
//!
//! A scene is assembled up front and then only read: rendering shares it by
//! reference across worker threads.

use lumen_math::Ray;

use crate::geometry::{Geometries, Hit, Intersectable, Surface};
use crate::light::{AmbientLight, LightSource};
use crate::material::Color;

/// A complete scene: surfaces, lights and the background.
#[derive(Debug, Default)]
pub struct Scene {
    /// Scene name (used in log output)
    pub name: String,

    /// Color of rays that hit nothing
    pub background: Color,

    /// Fill light added once per traced ray
    pub ambient: AmbientLight,

    /// Light sources, in insertion order
    pub lights: Vec<LightSource>,

    /// Every surface in the scene
    pub geometries: Geometries,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Replace the surface collection.
    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    /// Add a surface to the scene.
    pub fn add_surface(&mut self, surface: Surface) {
        self.geometries.add(surface);
    }

    /// Add a light source to the scene.
    pub fn add_light(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    /// Nearest surface hit along `ray` within `(0, max_distance]`.
    pub fn closest_hit(&self, ray: &Ray, max_distance: f64) -> Option<Hit<'_>> {
        self.geometries.closest_hit(ray, max_distance)
    }
}
