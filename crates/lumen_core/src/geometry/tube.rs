//! Infinite tubes and finite capped cylinders.
//!
//! Both intersect the ray with the tube quadric by working in the plane
//! perpendicular to the axis: with `d⊥` and `oc⊥` the ray direction and the
//! origin offset stripped of their axis components, hits solve
//! `|oc⊥ + t·d⊥|² = r²`.

use lumen_math::{align_zero, is_zero, DVec3, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// An infinite tube of constant radius around an axis line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    radius: f64,
    axis: Ray,
}

impl Tube {
    /// Create a tube around `axis`. The radius must be positive.
    pub fn new(radius: f64, axis: Ray) -> GeometryResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { radius, axis })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn axis(&self) -> Ray {
        self.axis
    }

    /// Signed position of the projection of `point` along the axis.
    fn axis_param(&self, point: Point) -> f64 {
        let v = point.to_dvec3() - self.axis.origin().to_dvec3();
        v.dot(self.axis.direction().to_dvec3())
    }

    /// Unit vector from the axis toward `point`, perpendicular to the axis.
    ///
    /// A point on the axis itself has no radial direction; the axis direction
    /// is returned instead.
    pub fn normal_at(&self, point: Point) -> Vector {
        let t = self.axis_param(point);
        let foot = self.axis.at(t);
        point
            .subtract(foot)
            .map(Vector::normalize)
            .unwrap_or(self.axis.direction())
    }

    /// Ray parameters where the ray meets the tube, nearest first.
    ///
    /// Rays parallel to the axis never meet it. A tangent ray yields one root.
    fn roots(&self, ray: &Ray, range: Interval) -> Vec<f64> {
        let a = self.axis.direction().to_dvec3();
        let d = ray.direction().to_dvec3();
        let oc = ray.origin().to_dvec3() - self.axis.origin().to_dvec3();

        let d_perp = d - a * d.dot(a);
        let oc_perp = oc - a * oc.dot(a);

        let qa = d_perp.length_squared();
        if is_zero(qa) {
            return Vec::new();
        }
        let qb = 2.0 * d_perp.dot(oc_perp);
        let qc = oc_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(qb * qb - 4.0 * qa * qc);
        if discriminant < 0.0 {
            return Vec::new();
        }
        if discriminant == 0.0 {
            let t = -qb / (2.0 * qa);
            return if range.admits(t) { vec![t] } else { Vec::new() };
        }

        let sqrtd = discriminant.sqrt();
        [(-qb - sqrtd) / (2.0 * qa), (-qb + sqrtd) / (2.0 * qa)]
            .into_iter()
            .filter(|&t| range.admits(t))
            .collect()
    }

    /// Intersection points with distance in `(0, max_distance]`, nearest first.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point> {
        self.roots(ray, Interval::ray(max_distance))
            .into_iter()
            .map(|t| ray.at(t))
            .collect()
    }
}

/// A tube cut to `height` along its axis and closed by two flat caps.
///
/// The base cap lies at the axis origin, the top cap at `height` along the
/// axis direction. Points on the cap rims belong to the caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a cylinder. Radius and height must be positive.
    pub fn new(radius: f64, axis: Ray, height: f64) -> GeometryResult<Self> {
        let tube = Tube::new(radius, axis)?;
        if align_zero(height) <= 0.0 {
            return Err(GeometryError::InvalidHeight(height));
        }
        Ok(Self { tube, height })
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius
    }

    pub fn axis(&self) -> Ray {
        self.tube.axis
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Unit normal at a point on the cylinder.
    ///
    /// Points level with a cap (within tolerance) get the cap's outward
    /// normal: `−axis` at the base and `+axis` at the top. Everything else
    /// gets the radial normal of the tube.
    pub fn normal_at(&self, point: Point) -> Vector {
        let t = self.tube.axis_param(point);
        let axis = self.tube.axis.direction();
        if is_zero(t) {
            -axis
        } else if is_zero(t - self.height) {
            axis
        } else {
            self.tube.normal_at(point)
        }
    }

    /// Ray parameter of the hit with a cap disk, rim included.
    fn cap_root(&self, ray: &Ray, center: DVec3, range: Interval) -> Option<f64> {
        let a = self.tube.axis.direction().to_dvec3();
        let nv = a.dot(ray.direction().to_dvec3());
        if is_zero(nv) {
            return None;
        }
        let t = a.dot(center - ray.origin().to_dvec3()) / nv;
        if !range.admits(t) {
            return None;
        }
        let offset = ray.at(t).to_dvec3() - center;
        let r2 = self.tube.radius * self.tube.radius;
        (align_zero(offset.length_squared() - r2) <= 0.0).then_some(t)
    }

    /// Intersection points with distance in `(0, max_distance]`, nearest first.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Vec<Point> {
        let range = Interval::ray(max_distance);
        let axis = self.tube.axis;

        let mut roots: Vec<f64> = self
            .tube
            .roots(ray, range)
            .into_iter()
            .filter(|&t| {
                let along = self.tube.axis_param(ray.at(t));
                align_zero(along) > 0.0 && align_zero(along - self.height) < 0.0
            })
            .collect();

        let base = axis.origin().to_dvec3();
        let top = base + axis.direction().to_dvec3() * self.height;
        roots.extend(self.cap_root(ray, base, range));
        roots.extend(self.cap_root(ray, top, range));

        roots.sort_by(f64::total_cmp);
        roots.into_iter().map(|t| ray.at(t)).collect()
    }
}
