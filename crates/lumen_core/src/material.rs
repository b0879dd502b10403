//! Phong material coefficients and the color type.

use lumen_math::DVec3;

/// Color type alias (RGB, 0-255 per channel for displayable values).
///
/// Colors add and scale freely while shading; black (`Color::ZERO`) is the
/// identity for addition. Values are only clamped when written to an image.
pub type Color = DVec3;

/// Returns true if every channel of an attenuation factor is below `threshold`.
#[inline]
pub fn lower_than(k: DVec3, threshold: f64) -> bool {
    k.x < threshold && k.y < threshold && k.z < threshold
}

/// Returns true if two colors match within `tolerance` on every channel.
#[inline]
pub fn colors_match(a: Color, b: Color, tolerance: f64) -> bool {
    a.abs_diff_eq(b, tolerance)
}

/// Surface material for the local Phong model and recursive tracing.
///
/// Every coefficient is a per-channel attenuation factor. They are meant to
/// lie in [0, 1] but are not range checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse factor
    pub kd: DVec3,
    /// Specular factor
    pub ks: DVec3,
    /// Transparency factor (refraction and shadow transmission)
    pub kt: DVec3,
    /// Reflection factor
    pub kr: DVec3,
    /// Specular exponent
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            shininess: 1,
        }
    }
}

impl Material {
    /// A black, opaque, non-reflective material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a uniform diffuse factor.
    pub fn with_kd(self, kd: f64) -> Self {
        self.with_kd3(DVec3::splat(kd))
    }

    /// Set a per-channel diffuse factor.
    pub fn with_kd3(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    /// Set a uniform specular factor.
    pub fn with_ks(self, ks: f64) -> Self {
        self.with_ks3(DVec3::splat(ks))
    }

    pub fn with_ks3(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    /// Set a uniform transparency factor.
    pub fn with_kt(self, kt: f64) -> Self {
        self.with_kt3(DVec3::splat(kt))
    }

    pub fn with_kt3(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    /// Set a uniform reflection factor.
    pub fn with_kr(self, kr: f64) -> Self {
        self.with_kr3(DVec3::splat(kr))
    }

    pub fn with_kr3(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Diffuse term for a light hitting the surface with `nl = n·l`.
    ///
    /// Uses the absolute value so back-lit faces shade like front-lit ones.
    pub fn diffuse(&self, nl: f64) -> DVec3 {
        self.kd * nl.abs()
    }

    /// Specular term `kS·max(0, −v·r)^shininess`, with `r` the light direction
    /// mirrored about the normal.
    pub fn specular(&self, n: DVec3, l: DVec3, nl: f64, v: DVec3) -> DVec3 {
        let r = l - n * (2.0 * nl);
        let vr = (-v.dot(r)).max(0.0);
        self.ks * vr.powi(self.shininess)
    }

    /// True if nothing reflects or transmits, so tracing stops at this surface.
    pub fn is_local_only(&self) -> bool {
        self.kr == DVec3::ZERO && self.kt == DVec3::ZERO
    }
}
