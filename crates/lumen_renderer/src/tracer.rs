//! Recursive Phong ray tracing.
//!
//! Shading a hit adds a local term (emission plus diffuse and specular light
//! from every visible light source) and a global term (one reflected and one
//! refracted ray, traced recursively). Recursion stops after [`MAX_LEVEL`]
//! bounces or once the accumulated attenuation drops below [`MIN_K`].

use lumen_core::material::lower_than;
use lumen_core::{Color, Hit, Intersectable, LightSource, Scene};
use lumen_math::{align_zero, same_sign, DVec3, Point, Ray, Vector};
use rand::RngCore;

use crate::sampling::jittered_grid;

/// Maximum number of shading levels along one primary ray.
pub const MAX_LEVEL: u32 = 10;

/// Attenuation below which a contribution is not worth tracing.
pub const MIN_K: f64 = 0.001;

const INITIAL_K: DVec3 = DVec3::ONE;

/// Strategy that turns a ray into a color.
pub trait RayTracer: Send + Sync {
    /// Color seen along `ray`.
    ///
    /// `rng` drives any stochastic sampling (soft shadows).
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color;
}

/// Whitted-style tracer over a [`Scene`].
pub struct SimpleRayTracer<'a> {
    scene: &'a Scene,
}

impl<'a> SimpleRayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Full color of a hit: local plus (above the last level) global effects.
    fn shade(&self, hit: &Hit<'_>, ray: &Ray, level: u32, k: DVec3, rng: &mut dyn RngCore) -> Color {
        let local = self.local_effects(hit, ray, k, rng);
        if level <= 1 || hit.surface.material().is_local_only() {
            return local;
        }
        local + self.global_effects(hit, ray, level, k, rng)
    }

    fn local_effects(&self, hit: &Hit<'_>, ray: &Ray, k: DVec3, rng: &mut dyn RngCore) -> Color {
        let mut color = hit.surface.emission();
        let n = hit.normal();
        let v = ray.direction();
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return color;
        }

        let material = hit.surface.material();
        for light in &self.scene.lights {
            let Some(l) = light.incidence(hit.point) else {
                continue;
            };
            let nl = align_zero(n.dot(l));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(light, l, n, hit.point, rng);
            if lower_than(ktr * k, MIN_K) {
                continue;
            }

            let intensity = light.intensity_at(hit.point) * ktr;
            let (nd, ld, vd) = (n.to_dvec3(), l.to_dvec3(), v.to_dvec3());
            color += intensity * (material.diffuse(nl) + material.specular(nd, ld, nl, vd));
        }
        color
    }

    /// Fraction of a light's intensity that reaches `point` through the scene.
    fn transparency(
        &self,
        light: &LightSource,
        l: Vector,
        n: Vector,
        point: Point,
        rng: &mut dyn RngCore,
    ) -> DVec3 {
        let (Some(area), Some(position)) = (light.area(), light.position()) else {
            return self.transmittance(point, -l, n, light.distance(point));
        };

        // Soft shadows: average over a jittered grid on a square facing the point
        let (u, w) = l.to_dvec3().any_orthonormal_pair();
        let light_side = -n.dot(l);
        let samples = jittered_grid(area.root, area.size, area.size, rng);
        let count = samples.len() as f64;
        let mut total = DVec3::ZERO;
        for (x, y) in samples {
            let target = Point::from_dvec3(position.to_dvec3() + u * x + w * y);
            let Ok(to_light) = target.subtract(point) else {
                total += DVec3::ONE;
                continue;
            };
            // A sample behind the surface is blocked by the surface itself
            if !same_sign(n.dot(to_light), light_side) {
                continue;
            }
            total += self.transmittance(point, to_light, n, target.distance(point));
        }
        total / count
    }

    /// Product of the transparency factors of everything between `point` and
    /// a light `distance` away along `to_light`.
    fn transmittance(&self, point: Point, to_light: Vector, n: Vector, distance: f64) -> DVec3 {
        let shadow_ray = Ray::offset(point, to_light, n);
        let mut ktr = DVec3::ONE;
        for blocker in self.scene.geometries.find_intersections(&shadow_ray, distance) {
            ktr *= blocker.surface.material().kt;
            if ktr == DVec3::ZERO {
                break;
            }
        }
        ktr
    }

    fn global_effects(&self, hit: &Hit<'_>, ray: &Ray, level: u32, k: DVec3, rng: &mut dyn RngCore) -> Color {
        let material = hit.surface.material();
        let n = hit.normal();
        let v = ray.direction();

        let mut color = Color::ZERO;
        if let Some(reflected) = reflected_ray(hit.point, v, n) {
            color += self.global_effect(&reflected, level, k, material.kr, rng);
        }
        let refracted = Ray::offset(hit.point, v, n);
        color + self.global_effect(&refracted, level, k, material.kt, rng)
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: DVec3, kx: DVec3, rng: &mut dyn RngCore) -> Color {
        let kkx = k * kx;
        if lower_than(kkx, MIN_K) {
            return Color::ZERO;
        }
        match self.scene.closest_hit(ray, f64::INFINITY) {
            Some(hit) => self.shade(&hit, ray, level - 1, kkx, rng) * kx,
            None => self.scene.background * kx,
        }
    }
}

impl RayTracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.scene.closest_hit(ray, f64::INFINITY) {
            Some(hit) => self.shade(&hit, ray, MAX_LEVEL, INITIAL_K, rng) + self.scene.ambient.intensity(),
            None => self.scene.background,
        }
    }
}

/// Mirror ray `v − 2(v·n)n` leaving `point`.
fn reflected_ray(point: Point, v: Vector, n: Vector) -> Option<Ray> {
    let r = v.to_dvec3() - n.to_dvec3() * (2.0 * v.dot(n));
    Vector::try_from_dvec3(r)
        .ok()
        .map(|r| Ray::offset(point, r, n))
}
