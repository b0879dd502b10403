//! Light sources.
//!
//! Every light answers three questions for a scene point: which way its light
//! travels to reach the point, how strong it is there, and how far away it is
//! (for shadow rays).

use lumen_math::{DVec3, Point, Vector};

use crate::material::Color;

/// Uniform fill light added once per primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of `color` attenuated per channel by `ka`.
    pub fn new(color: Color, ka: DVec3) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// Ambient light of `color` attenuated uniformly by `ka`.
    pub fn uniform(color: Color, ka: f64) -> Self {
        Self::new(color, DVec3::splat(ka))
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Jittered sampling of a square light area, used for soft shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSampling {
    /// Side length of the square area, centered on the light position
    pub size: f64,
    /// Samples per side (the grid has `root * root` cells)
    pub root: usize,
}

/// Light arriving from one direction everywhere, e.g. the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

/// Omnidirectional light with distance attenuation `1 / (kC + kL·d + kQ·d²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
    area: Option<AreaSampling>,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            area: None,
        }
    }

    /// Constant attenuation term.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Linear attenuation term.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Quadratic attenuation term.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Cast soft shadows by sampling a `size`-wide square around the light
    /// with a `root × root` jittered grid.
    pub fn with_soft_shadows(mut self, size: f64, root: usize) -> Self {
        self.area = Some(AreaSampling { size, root: root.max(1) });
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    fn intensity_at(&self, point: Point) -> Color {
        let d = point.distance(self.position);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn incidence(&self, point: Point) -> Option<Vector> {
        point.subtract(self.position).ok().map(Vector::normalize)
    }
}

/// A point light focused along a direction.
///
/// Intensity falls off with `max(0, direction·l)^narrowness` on top of the
/// point light attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector,
    narrowness: i32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrowness: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Beam exponent: higher values give a tighter cone.
    pub fn with_narrowness(mut self, narrowness: i32) -> Self {
        self.narrowness = narrowness;
        self
    }

    pub fn with_soft_shadows(mut self, size: f64, root: usize) -> Self {
        self.point = self.point.with_soft_shadows(size, root);
        self
    }

    fn intensity_at(&self, point: Point) -> Color {
        let Some(l) = self.point.incidence(point) else {
            return Color::ZERO;
        };
        let cos = self.direction.dot(l);
        if cos <= 0.0 {
            return Color::ZERO;
        }
        self.point.intensity_at(point) * cos.powi(self.narrowness)
    }
}

/// Any light that illuminates surfaces in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource {
    /// Intensity of this light arriving at `point`.
    pub fn intensity_at(&self, point: Point) -> Color {
        match self {
            LightSource::Directional(light) => light.intensity,
            LightSource::Point(light) => light.intensity_at(point),
            LightSource::Spot(light) => light.intensity_at(point),
        }
    }

    /// Unit direction the light travels in to reach `point`.
    ///
    /// `None` when `point` sits exactly on a positional light.
    pub fn incidence(&self, point: Point) -> Option<Vector> {
        match self {
            LightSource::Directional(light) => Some(light.direction),
            LightSource::Point(light) => light.incidence(point),
            LightSource::Spot(light) => light.point.incidence(point),
        }
    }

    /// Distance from `point` to the light; infinite for directional lights.
    pub fn distance(&self, point: Point) -> f64 {
        match self.position() {
            Some(position) => point.distance(position),
            None => f64::INFINITY,
        }
    }

    /// Position of a positional light.
    pub fn position(&self) -> Option<Point> {
        match self {
            LightSource::Directional(_) => None,
            LightSource::Point(light) => Some(light.position),
            LightSource::Spot(light) => Some(light.point.position),
        }
    }

    /// Soft-shadow sampling, if enabled. Directional lights have none.
    pub fn area(&self) -> Option<AreaSampling> {
        match self {
            LightSource::Directional(_) => None,
            LightSource::Point(light) => light.area,
            LightSource::Spot(light) => light.point.area,
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}
