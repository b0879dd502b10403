use anyhow::{Context, Result};
use lumen_core::{
    AmbientLight, Color, Cylinder, DirectionalLight, Geometries, Material, Plane, PointLight, Polygon,
    Scene, Sphere, SpotLight, Surface, Triangle, Tube,
};
use lumen_math::{DVec3, Point, Ray, Vector};
use lumen_renderer::{AntiAliasing, Camera, CameraConfig, ImageBuffer, SimpleRayTracer};
use std::path::PathBuf;

/// Settings used when no file is given, and for any camera field a file leaves out.
fn default_settings() -> CameraConfig {
    CameraConfig::new()
        .with_location(Point::new(0.0, 40.0, 220.0))
        .looking_at(Point::new(0.0, 0.0, -60.0), DVec3::Y)
        .with_view_plane(200.0, 150.0)
        .with_view_plane_distance(180.0)
        .with_resolution(800, 600)
        .with_anti_aliasing(AntiAliasing::Adaptive, 5)
        .with_threads(-2)
        .with_progress_interval(10)
}

fn load_settings(path: Option<&PathBuf>) -> Result<CameraConfig> {
    let defaults = default_settings();
    let Some(path) = path else {
        log::info!("No settings file given, using built-in camera");
        return Ok(defaults);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let mut config: CameraConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    config.direction = config.direction.or(defaults.direction);
    config.view_plane_width = config.view_plane_width.or(defaults.view_plane_width);
    config.view_plane_height = config.view_plane_height.or(defaults.view_plane_height);
    config.view_plane_distance = config.view_plane_distance.or(defaults.view_plane_distance);
    config.resolution = config.resolution.or(defaults.resolution);
    log::info!("Loaded settings from {}", path.display());
    Ok(config)
}

fn demo_scene() -> Result<Scene> {
    let mut scene = Scene::new("demo")
        .with_background(Color::new(12.0, 14.0, 24.0))
        .with_ambient_light(AmbientLight::uniform(Color::splat(255.0), 0.08));

    let floor = Material::new().with_kd(0.5).with_ks(0.2).with_shininess(20).with_kr(0.25);
    let glossy = Material::new().with_kd(0.4).with_ks(0.6).with_shininess(60);
    let glass = Material::new().with_kd(0.1).with_ks(0.8).with_shininess(120).with_kt(0.6);
    let mirror = Material::new().with_ks(0.5).with_shininess(200).with_kr(0.85);

    scene.add_surface(
        Surface::new(Plane::new(Point::new(0.0, -40.0, 0.0), Vector::Y))
            .with_emission(Color::new(20.0, 20.0, 20.0))
            .with_material(floor),
    );

    let spheres = Geometries::new()
        .with(
            Surface::new(Sphere::new(Point::new(-50.0, -10.0, -60.0), 30.0)?)
                .with_emission(Color::new(90.0, 10.0, 10.0))
                .with_material(glossy),
        )
        .with(
            Surface::new(Sphere::new(Point::new(20.0, -15.0, -20.0), 25.0)?)
                .with_emission(Color::new(10.0, 20.0, 60.0))
                .with_material(glass),
        )
        .with(
            Surface::new(Sphere::new(Point::new(20.0, -15.0, -20.0), 12.0)?)
                .with_emission(Color::new(100.0, 70.0, 10.0))
                .with_material(glossy),
        );
    scene.geometries.add(spheres);

    scene.add_surface(
        Surface::new(Polygon::new(&[
            Point::new(-120.0, -40.0, -160.0),
            Point::new(120.0, -40.0, -160.0),
            Point::new(120.0, 90.0, -180.0),
            Point::new(-120.0, 90.0, -180.0),
        ])?)
        .with_emission(Color::new(5.0, 5.0, 5.0))
        .with_material(mirror),
    );
    scene.add_surface(
        Surface::new(Triangle::new(
            Point::new(60.0, -40.0, -90.0),
            Point::new(110.0, -40.0, -110.0),
            Point::new(85.0, 30.0, -100.0),
        )?)
        .with_emission(Color::new(20.0, 60.0, 20.0))
        .with_material(glossy),
    );

    scene.add_surface(
        Surface::new(Cylinder::new(8.0, Ray::new(Point::new(-90.0, -40.0, -20.0), Vector::Y), 60.0)?)
            .with_emission(Color::new(60.0, 40.0, 20.0))
            .with_material(glossy),
    );
    scene.add_surface(
        Surface::new(Tube::new(2.0, Ray::new(Point::new(0.0, 0.0, -140.0), Vector::X))?)
            .with_emission(Color::new(40.0, 40.0, 40.0))
            .with_material(Material::new().with_kd(0.3).with_ks(0.3).with_shininess(10)),
    );

    scene.add_light(
        PointLight::new(Color::new(900.0, 800.0, 700.0), Point::new(-80.0, 120.0, 40.0))
            .with_kl(0.0005)
            .with_kq(0.00001)
            .with_soft_shadows(20.0, 3)
            .into(),
    );
    scene.add_light(
        SpotLight::new(
            Color::new(600.0, 600.0, 900.0),
            Point::new(60.0, 80.0, 60.0),
            Vector::new(-1.0, -1.5, -2.0)?,
        )
        .with_kl(0.0004)
        .with_narrowness(4)
        .into(),
    );
    scene.add_light(DirectionalLight::new(Color::new(60.0, 50.0, 40.0), Vector::new(1.0, -1.0, -1.0)?).into());

    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let settings = args.next().map(PathBuf::from);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("lumen.png"));

    log::info!("Starting Lumen");

    let config = load_settings(settings.as_ref())?;
    let camera = Camera::build(config).context("Invalid camera settings")?;
    let scene = demo_scene().context("Failed to build demo scene")?;
    log::info!(
        "Scene '{}': {} surface groups, {} lights",
        scene.name,
        scene.geometries.len(),
        scene.lights.len()
    );

    let (width, height) = camera.resolution();
    let mut image = ImageBuffer::new(width, height);
    let tracer = SimpleRayTracer::new(&scene);
    camera.render_image(&tracer, &mut image).context("Render failed")?;

    image
        .save(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    Ok(())
}
