//! Lumen Renderer - CPU recursive ray tracing
//!
//! A Whitted-style ray tracer with Phong shading, shadow rays, mirror
//! reflection, straight-through transparency and soft shadows from area-sampled
//! lights. The camera supports jittered and adaptive anti-aliasing and can
//! spread pixels over rayon or a fixed pool of worker threads.

mod camera;
mod error;
mod output;
pub mod sampling;
pub mod scheduler;
mod tracer;

pub use camera::{AntiAliasing, Camera, CameraConfig, CameraDirection};
pub use error::{ConfigError, RenderError, RenderResult};
pub use output::{clamp_channel, color_to_rgba, ImageBuffer, ImageWriter};
pub use scheduler::Threading;
pub use tracer::{RayTracer, SimpleRayTracer, MAX_LEVEL, MIN_K};

/// Re-export the scene model
pub use lumen_core::{Color, Scene};

use rand::{Rng, RngCore};

/// Uniform random number in [0, 1).
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}
