//! Pinhole camera: view plane geometry, per-pixel sampling and the render loop.

use lumen_core::Color;
use lumen_math::{is_zero, DVec3, Point, Ray, Vector};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;

use crate::error::{ConfigError, RenderResult};
use crate::output::ImageWriter;
use crate::sampling::{jittered_grid, lattice_offset, AdaptiveSampler};
use crate::scheduler::{render_frame, Threading};
use crate::tracer::RayTracer;

/// How the camera orientation is given.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraDirection {
    /// Viewing direction and up vector; they must be perpendicular.
    Explicit { towards: DVec3, up: DVec3 },
    /// Look from the camera location at `target`; `up` only needs to not be
    /// parallel to the viewing direction.
    LookAt { target: DVec3, up: DVec3 },
}

/// Per-pixel sampling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiAliasing {
    /// One ray through the pixel center.
    #[default]
    None,
    /// One random ray per cell of a `root × root` grid, averaged.
    Jittered,
    /// Corner refinement over a `root × root` lattice.
    Adaptive,
}

/// Unvalidated camera settings.
///
/// Every field is optional when deserializing; [`Camera::build`] reports what
/// is missing or out of range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub location: DVec3,
    pub direction: Option<CameraDirection>,
    pub view_plane_width: Option<f64>,
    pub view_plane_height: Option<f64>,
    pub view_plane_distance: Option<f64>,
    /// Image width and height in pixels
    pub resolution: Option<[u32; 2]>,
    pub anti_aliasing: AntiAliasing,
    pub sample_root: usize,
    /// 0 sequential, n > 0 worker pool, -1 rayon, -2 automatic pool
    pub threads: i32,
    /// Log progress every this many percent; 0 disables
    pub progress_interval: u32,
    pub seed: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: DVec3::ZERO,
            direction: None,
            view_plane_width: None,
            view_plane_height: None,
            view_plane_distance: None,
            resolution: None,
            anti_aliasing: AntiAliasing::None,
            sample_root: 1,
            threads: 0,
            progress_interval: 0,
            seed: 0,
        }
    }
}

impl CameraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: Point) -> Self {
        self.location = location.to_dvec3();
        self
    }

    /// Set the viewing direction and up vector.
    pub fn with_direction(mut self, towards: DVec3, up: DVec3) -> Self {
        self.direction = Some(CameraDirection::Explicit { towards, up });
        self
    }

    /// Aim the camera at a point.
    pub fn looking_at(mut self, target: Point, up: DVec3) -> Self {
        self.direction = Some(CameraDirection::LookAt {
            target: target.to_dvec3(),
            up,
        });
        self
    }

    pub fn with_view_plane(mut self, width: f64, height: f64) -> Self {
        self.view_plane_width = Some(width);
        self.view_plane_height = Some(height);
        self
    }

    pub fn with_view_plane_distance(mut self, distance: f64) -> Self {
        self.view_plane_distance = Some(distance);
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some([width, height]);
        self
    }

    pub fn with_anti_aliasing(mut self, anti_aliasing: AntiAliasing, sample_root: usize) -> Self {
        self.anti_aliasing = anti_aliasing;
        self.sample_root = sample_root;
        self
    }

    pub fn with_threads(mut self, threads: i32) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_progress_interval(mut self, percent: u32) -> Self {
        self.progress_interval = percent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A validated camera, ready to render.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    towards: Vector,
    up: Vector,
    right: Vector,
    width: f64,
    height: f64,
    distance: f64,
    image_width: u32,
    image_height: u32,
    view_center: Point,
    anti_aliasing: AntiAliasing,
    sample_root: usize,
    threading: Threading,
    progress_interval: u32,
    seed: u64,
}

fn positive(value: Option<f64>, name: &'static str, missing: &'static str) -> Result<f64, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(missing))?;
    if value <= 0.0 || is_zero(value) || !value.is_finite() {
        return Err(ConfigError::invalid(format!("{name} must be positive, got {value}")));
    }
    Ok(value)
}

fn vector(v: DVec3, name: &str) -> Result<Vector, ConfigError> {
    Vector::try_from_dvec3(v)
        .map(Vector::normalize)
        .map_err(|_| ConfigError::invalid(format!("{name} vector must not be zero")))
}

impl Camera {
    /// Validate settings and derive the camera basis.
    pub fn build(config: CameraConfig) -> Result<Self, ConfigError> {
        let location = Point::from_dvec3(config.location);

        let direction = config.direction.ok_or(ConfigError::Missing("direction"))?;
        let (towards, up) = match direction {
            CameraDirection::Explicit { towards, up } => {
                let towards = vector(towards, "towards")?;
                let up = vector(up, "up")?;
                if !is_zero(towards.dot(up)) {
                    return Err(ConfigError::invalid("towards and up vectors must be perpendicular"));
                }
                (towards, up)
            }
            CameraDirection::LookAt { target, up } => {
                let towards = Point::from_dvec3(target)
                    .subtract(location)
                    .map(Vector::normalize)
                    .map_err(|_| ConfigError::invalid("look-at target must differ from the camera location"))?;
                let up = vector(up, "up")?;
                let right = up
                    .cross(towards)
                    .map_err(|_| ConfigError::invalid("up vector must not be parallel to the view direction"))?;
                let up = towards.cross(right).map_err(|_| ConfigError::invalid("degenerate camera basis"))?;
                (towards, up.normalize())
            }
        };
        let right = up
            .cross(towards)
            .map_err(|_| ConfigError::invalid("degenerate camera basis"))?
            .normalize();

        let width = positive(config.view_plane_width, "view plane width", "view plane size")?;
        let height = positive(config.view_plane_height, "view plane height", "view plane size")?;
        let distance = positive(config.view_plane_distance, "view plane distance", "view plane distance")?;

        let [image_width, image_height] = config.resolution.ok_or(ConfigError::Missing("resolution"))?;
        if image_width == 0 || image_height == 0 {
            return Err(ConfigError::invalid(format!(
                "resolution must be positive, got {image_width}x{image_height}"
            )));
        }

        if config.progress_interval > 100 {
            return Err(ConfigError::invalid(format!(
                "progress interval must be between 0 and 100, got {}",
                config.progress_interval
            )));
        }
        let threading = Threading::from_code(config.threads)?;

        let mut sample_root = config.sample_root.max(1);
        match config.anti_aliasing {
            AntiAliasing::None => {}
            AntiAliasing::Jittered if sample_root == 1 => {
                log::warn!("Jittered anti-aliasing with a sample root of 1 traces only the pixel center");
            }
            AntiAliasing::Adaptive if sample_root < 2 => {
                log::warn!("Adaptive anti-aliasing needs a sample root of at least 2, using 2");
                sample_root = 2;
            }
            _ => {}
        }

        let view_center = Point::from_dvec3(location.to_dvec3() + towards.to_dvec3() * distance);
        log::debug!(
            "Camera at {:?} looking {:?}, {}x{} pixels, {:?} x{}",
            location.to_dvec3(),
            towards.to_dvec3(),
            image_width,
            image_height,
            config.anti_aliasing,
            sample_root
        );

        Ok(Self {
            location,
            towards,
            up,
            right,
            width,
            height,
            distance,
            image_width,
            image_height,
            view_center,
            anti_aliasing: config.anti_aliasing,
            sample_root,
            threading,
            progress_interval: config.progress_interval,
            seed: config.seed,
        })
    }

    pub fn location(&self) -> Point {
        self.location
    }

    /// Unit viewing direction, up and right vectors.
    pub fn basis(&self) -> (Vector, Vector, Vector) {
        (self.towards, self.up, self.right)
    }

    /// Image width and height in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn view_plane_distance(&self) -> f64 {
        self.distance
    }

    pub fn threading(&self) -> Threading {
        self.threading
    }

    fn pixel_size(&self) -> (f64, f64) {
        (
            self.width / self.image_width as f64,
            self.height / self.image_height as f64,
        )
    }

    /// Center of pixel (`col`, `row`) on the view plane.
    pub fn pixel_center(&self, col: u32, row: u32) -> Point {
        let (pixel_w, pixel_h) = self.pixel_size();
        let x = (col as f64 - (self.image_width as f64 - 1.0) / 2.0) * pixel_w;
        let y = -(row as f64 - (self.image_height as f64 - 1.0) / 2.0) * pixel_h;
        self.view_point(self.view_center, x, y)
    }

    fn view_point(&self, origin: Point, x: f64, y: f64) -> Point {
        Point::from_dvec3(origin.to_dvec3() + self.right.to_dvec3() * x + self.up.to_dvec3() * y)
    }

    fn ray_through(&self, target: Point) -> Ray {
        let direction = target.subtract(self.location).unwrap_or(self.towards);
        Ray::new(self.location, direction)
    }

    /// Ray from the camera through the center of pixel (`col`, `row`).
    pub fn construct_ray(&self, col: u32, row: u32) -> Ray {
        self.ray_through(self.pixel_center(col, row))
    }

    /// Color of one pixel under the configured anti-aliasing.
    pub fn cast_pixel(&self, tracer: &dyn RayTracer, col: u32, row: u32, rng: &mut dyn RngCore) -> Color {
        let center = self.pixel_center(col, row);
        let (pixel_w, pixel_h) = self.pixel_size();

        match self.anti_aliasing {
            AntiAliasing::None => tracer.trace_ray(&self.ray_through(center), rng),
            AntiAliasing::Jittered => {
                let offsets = jittered_grid(self.sample_root, pixel_w, pixel_h, rng);
                let count = offsets.len() as f64;
                let mut color = Color::ZERO;
                for (x, y) in offsets {
                    let ray = self.ray_through(self.view_point(center, x, y));
                    color += tracer.trace_ray(&ray, rng);
                }
                color / count
            }
            AntiAliasing::Adaptive => {
                let side = self.sample_root;
                let mut sampler = AdaptiveSampler::new(side, |lattice_row, lattice_col| {
                    let (x, y) = lattice_offset(lattice_row, lattice_col, side, pixel_w, pixel_h);
                    let ray = self.ray_through(self.view_point(center, x, y));
                    tracer.trace_ray(&ray, &mut *rng)
                });
                sampler.sample()
            }
        }
    }

    /// Render the full image into `writer`.
    ///
    /// Each pixel gets its own random stream seeded from the camera seed and
    /// the pixel index, so the image is the same for every threading mode.
    pub fn render_image(&self, tracer: &dyn RayTracer, writer: &mut dyn ImageWriter) -> RenderResult<()> {
        let (nx, ny) = (self.image_width, self.image_height);
        let dimensions = writer.dimensions();
        if dimensions != (nx, ny) {
            return Err(ConfigError::invalid(format!(
                "image is {}x{} but the camera renders {nx}x{ny}",
                dimensions.0, dimensions.1
            ))
            .into());
        }

        let start = std::time::Instant::now();
        let pixels = render_frame(self.threading, nx, ny, self.progress_interval as usize, |index| {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
            let col = (index % nx as usize) as u32;
            let row = (index / nx as usize) as u32;
            self.cast_pixel(tracer, col, row, &mut rng)
        })?;

        for (index, color) in pixels.into_iter().enumerate() {
            writer.write_pixel((index % nx as usize) as u32, (index / nx as usize) as u32, color);
        }
        log::info!("Rendered {nx}x{ny} in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Paint grid lines every `interval` pixels over whatever `writer` holds.
    pub fn print_grid(&self, writer: &mut dyn ImageWriter, interval: u32, color: Color) -> Result<(), ConfigError> {
        if interval == 0 {
            return Err(ConfigError::invalid("grid interval must be positive"));
        }
        let (nx, ny) = writer.dimensions();
        for row in 0..ny {
            for col in 0..nx {
                if row % interval == 0 || col % interval == 0 {
                    writer.write_pixel(col, row, color);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ImageBuffer;
    use crate::tracer::SimpleRayTracer;
    use lumen_core::{
        AmbientLight, Intersectable, Material, Plane, PointLight, Scene, Sphere, Surface, Triangle,
    };

    fn base_config() -> CameraConfig {
        CameraConfig::new()
            .with_direction(DVec3::NEG_Z, DVec3::Y)
            .with_view_plane(3.0, 3.0)
            .with_view_plane_distance(1.0)
            .with_resolution(3, 3)
    }

    fn count_hits(shape: impl Into<lumen_core::Shape>, camera: &Camera) -> usize {
        let surface = Surface::new(shape);
        let mut count = 0;
        for row in 0..3 {
            for col in 0..3 {
                count += surface.find_all(&camera.construct_ray(col, row)).len();
            }
        }
        count
    }

    /// Colors each pixel of a 3x2 image with unit pixels by its index, in red.
    struct IndexTracer;

    impl RayTracer for IndexTracer {
        fn trace_ray(&self, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
            // Recover the pixel from where the ray crosses the unit-distance plane
            let d = ray.direction().to_dvec3() / -ray.direction().z();
            let col = (1.0 - d.x).round();
            let row = (0.5 - d.y).round();
            Color::new(row * 3.0 + col, 0.0, 0.0)
        }
    }

    #[test]
    fn test_missing_settings() {
        let missing = |config: CameraConfig| Camera::build(config).unwrap_err();

        let mut config = base_config();
        config.direction = None;
        assert_eq!(missing(config), ConfigError::Missing("direction"));

        let mut config = base_config();
        config.view_plane_height = None;
        assert_eq!(missing(config), ConfigError::Missing("view plane size"));

        let mut config = base_config();
        config.view_plane_distance = None;
        assert_eq!(missing(config), ConfigError::Missing("view plane distance"));

        let mut config = base_config();
        config.resolution = None;
        assert_eq!(missing(config), ConfigError::Missing("resolution"));
    }

    #[test]
    fn test_invalid_settings() {
        let invalid = |config: CameraConfig| {
            matches!(Camera::build(config), Err(ConfigError::InvalidArgument(_)))
        };

        assert!(invalid(base_config().with_direction(DVec3::NEG_Z, DVec3::new(0.0, 1.0, 1.0))));
        assert!(invalid(base_config().with_direction(DVec3::ZERO, DVec3::Y)));
        assert!(invalid(base_config().with_view_plane(0.0, 3.0)));
        assert!(invalid(base_config().with_view_plane(3.0, -1.0)));
        assert!(invalid(base_config().with_view_plane_distance(0.0)));
        assert!(invalid(base_config().with_resolution(0, 3)));
        assert!(invalid(base_config().with_threads(-3)));
        assert!(invalid(base_config().with_progress_interval(101)));
        assert!(invalid(base_config().looking_at(Point::ZERO, DVec3::Y)));
        assert!(invalid(base_config().looking_at(Point::new(0.0, 5.0, 0.0), DVec3::Y)));
    }

    #[test]
    fn test_right_is_up_cross_towards() {
        let camera = Camera::build(base_config()).unwrap();
        let (towards, up, right) = camera.basis();
        assert_eq!(towards, Vector::NEG_Z);
        assert_eq!(up, Vector::Y);
        assert_eq!(right, Vector::NEG_X);
        assert_eq!(right, up.cross(towards).unwrap());

        // Column 0 lies on the -right side, row 1 is the middle row
        let ray = camera.construct_ray(0, 1);
        assert_eq!(ray.direction(), Vector::new(1.0, 0.0, -1.0).unwrap().normalize());
    }

    #[test]
    fn test_look_at_orthogonalizes_up() {
        let camera = Camera::build(
            base_config()
                .with_location(Point::new(0.0, 0.0, 10.0))
                .looking_at(Point::ZERO, DVec3::new(0.0, 1.0, 1.0)),
        )
        .unwrap();
        let (towards, up, right) = camera.basis();
        assert_eq!(towards, Vector::NEG_Z);
        assert_eq!(up, Vector::Y);
        assert_eq!(right, Vector::NEG_X);
    }

    #[test]
    fn test_construct_ray_through_pixel_centers() {
        let camera = Camera::build(
            base_config()
                .with_view_plane(8.0, 8.0)
                .with_view_plane_distance(10.0)
                .with_resolution(4, 4),
        )
        .unwrap();

        let ray = camera.construct_ray(0, 0);
        assert_eq!(ray.origin(), Point::ZERO);
        assert_eq!(ray.direction(), Vector::new(3.0, 3.0, -10.0).unwrap().normalize());

        let ray = camera.construct_ray(3, 1);
        assert_eq!(ray.direction(), Vector::new(-3.0, 1.0, -10.0).unwrap().normalize());
    }

    #[test]
    fn test_sphere_integration() {
        let camera1 = Camera::build(base_config()).unwrap();
        let camera2 = Camera::build(base_config().with_location(Point::new(0.0, 0.0, 0.5))).unwrap();

        let sphere = |r: f64, z: f64| Sphere::new(Point::new(0.0, 0.0, z), r).unwrap();
        assert_eq!(count_hits(sphere(1.0, -3.0), &camera1), 2);
        assert_eq!(count_hits(sphere(2.5, -2.5), &camera2), 18);
        assert_eq!(count_hits(sphere(2.0, -2.0), &camera2), 10);
        assert_eq!(count_hits(sphere(4.0, -1.0), &camera1), 9);
        assert_eq!(count_hits(sphere(0.5, 1.0), &camera1), 0);
    }

    #[test]
    fn test_plane_integration() {
        let camera = Camera::build(base_config()).unwrap();
        let a = Point::new(0.0, 2.0, -2.0);
        let b = Point::new(0.0, 0.0, -2.0);
        let plane = |c: Point| Plane::from_points(a, b, c).unwrap();

        assert_eq!(count_hits(plane(Point::new(2.0, 0.0, -2.0)), &camera), 9);
        assert_eq!(count_hits(plane(Point::new(2.0, 0.0, -1.0)), &camera), 9);
        assert_eq!(count_hits(plane(Point::new(2.0, 0.0, 4.0)), &camera), 6);
        let behind = Plane::from_points(
            Point::new(2.0, 2.0, 2.0),
            Point::new(0.0, 2.0, 2.0),
            Point::new(0.0, 0.0, 2.0),
        )
        .unwrap();
        assert_eq!(count_hits(behind, &camera), 0);
    }

    #[test]
    fn test_triangle_integration() {
        let camera = Camera::build(base_config()).unwrap();
        let c = Point::new(1.0, -1.0, -2.0);
        let d = Point::new(-1.0, -1.0, -2.0);
        let triangle = |a: Point, b: Point, c: Point| Triangle::new(a, b, c).unwrap();

        assert_eq!(count_hits(triangle(c, d, Point::new(0.0, 1.0, -2.0)), &camera), 1);
        assert_eq!(count_hits(triangle(c, d, Point::new(0.0, 20.0, -2.0)), &camera), 2);
        // Center ray on an edge
        let on_edge = triangle(
            Point::new(0.0, 1.0, -2.0),
            Point::new(0.5, 0.0, -2.0),
            Point::new(-0.5, 0.0, -2.0),
        );
        assert_eq!(count_hits(on_edge, &camera), 0);
        // Center ray on a vertex
        let on_vertex = triangle(
            Point::new(0.0, 0.0, -2.0),
            Point::new(0.5, 1.0, -2.0),
            Point::new(-0.5, 1.0, -2.0),
        );
        assert_eq!(count_hits(on_vertex, &camera), 0);
    }

    #[test]
    fn test_render_writes_every_pixel_in_place() {
        let camera = Camera::build(
            base_config()
                .with_view_plane(3.0, 2.0)
                .with_resolution(3, 2)
                .with_view_plane_distance(1.0),
        )
        .unwrap();
        let mut image = ImageBuffer::new(3, 2);
        camera
            .render_image(&IndexTracer, &mut image)
            .unwrap();

        for (index, color) in image.pixels.iter().enumerate() {
            assert!((color.x - index as f64).abs() < 1e-9, "pixel {index} got {color:?}");
        }
    }

    #[test]
    fn test_render_rejects_mismatched_image() {
        let camera = Camera::build(base_config()).unwrap();
        let mut image = ImageBuffer::new(4, 3);
        let result = camera.render_image(&IndexTracer, &mut image);
        assert!(matches!(
            result,
            Err(crate::RenderError::Config(ConfigError::InvalidArgument(_)))
        ));
    }

    fn demo_scene() -> Scene {
        let mut scene = Scene::new("spheres")
            .with_background(Color::new(20.0, 20.0, 40.0))
            .with_ambient_light(AmbientLight::uniform(Color::splat(255.0), 0.05));
        scene.add_surface(
            Surface::new(Sphere::new(Point::new(0.0, 0.0, -60.0), 20.0).unwrap())
                .with_emission(Color::new(0.0, 0.0, 80.0))
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(30).with_kt(0.3)),
        );
        scene.add_surface(
            Surface::new(Plane::new(Point::new(0.0, -20.0, 0.0), Vector::Y))
                .with_material(Material::new().with_kd(0.4).with_kr(0.3)),
        );
        scene.add_light(
            PointLight::new(Color::new(500.0, 400.0, 300.0), Point::new(-30.0, 40.0, -10.0))
                .with_kl(0.001)
                .with_soft_shadows(6.0, 3)
                .into(),
        );
        scene
    }

    #[test]
    fn test_output_is_identical_across_thread_modes() {
        let scene = demo_scene();
        let tracer = SimpleRayTracer::new(&scene);

        for anti_aliasing in [AntiAliasing::None, AntiAliasing::Jittered, AntiAliasing::Adaptive] {
            let render = |threads: i32| {
                let camera = Camera::build(
                    CameraConfig::new()
                        .with_direction(DVec3::NEG_Z, DVec3::Y)
                        .with_view_plane(60.0, 45.0)
                        .with_view_plane_distance(40.0)
                        .with_resolution(16, 12)
                        .with_anti_aliasing(anti_aliasing, 3)
                        .with_threads(threads)
                        .with_seed(7),
                )
                .unwrap();
                let mut image = ImageBuffer::new(16, 12);
                camera.render_image(&tracer, &mut image).unwrap();
                image.pixels
            };

            let sequential = render(0);
            assert_eq!(render(-1), sequential, "{anti_aliasing:?} rayon");
            assert_eq!(render(3), sequential, "{anti_aliasing:?} pool");
            assert_eq!(render(-2), sequential, "{anti_aliasing:?} auto");
        }
    }

    #[test]
    fn test_uniform_scene_is_the_same_under_all_sampling() {
        let scene = Scene::new("empty").with_background(Color::new(1.0, 2.0, 3.0));
        let tracer = SimpleRayTracer::new(&scene);

        for anti_aliasing in [AntiAliasing::None, AntiAliasing::Jittered, AntiAliasing::Adaptive] {
            let camera = Camera::build(base_config().with_anti_aliasing(anti_aliasing, 4)).unwrap();
            let mut image = ImageBuffer::new(3, 3);
            camera.render_image(&tracer, &mut image).unwrap();
            assert!(image.pixels.iter().all(|c| (*c - Color::new(1.0, 2.0, 3.0)).length() < 1e-9));
        }
    }

    #[test]
    fn test_print_grid() {
        let camera = Camera::build(base_config()).unwrap();
        let mut image = ImageBuffer::new(5, 4);
        let red = Color::new(255.0, 0.0, 0.0);

        camera.print_grid(&mut image, 2, red).unwrap();
        for row in 0..4 {
            for col in 0..5 {
                let expected = if row % 2 == 0 || col % 2 == 0 { red } else { Color::ZERO };
                assert_eq!(image.get(col, row), expected, "({col}, {row})");
            }
        }

        assert!(camera.print_grid(&mut image, 0, red).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "location": [0.0, 0.0, 5.0],
            "direction": { "look_at": { "target": [0.0, 0.0, 0.0], "up": [0.0, 1.0, 0.0] } },
            "view_plane_width": 4.0,
            "view_plane_height": 3.0,
            "view_plane_distance": 2.0,
            "resolution": [40, 30],
            "anti_aliasing": "adaptive",
            "sample_root": 5,
            "threads": -1,
            "progress_interval": 10
        }"#;
        let config: CameraConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.anti_aliasing, AntiAliasing::Adaptive);
        assert_eq!(config.seed, 0);

        let camera = Camera::build(config).unwrap();
        assert_eq!(camera.resolution(), (40, 30));
        assert_eq!(camera.threading(), Threading::Parallel);
        assert_eq!(camera.location(), Point::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let json = r#"{ "fov": 90 }"#;
        assert!(serde_json::from_str::<CameraConfig>(json).is_err());
    }
}
