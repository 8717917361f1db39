//! Builtin demo scenes.

use lumen_render::{
    CameraConfig, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, Scene,
    Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Names accepted by `--scene` besides a path to a JSON file.
pub const BUILTIN_SCENES: &[&str] = &["two-spheres", "materials", "cover"];

/// Build a builtin scene by name. `seed` drives any random placement.
pub fn builtin(name: &str, seed: u64) -> Option<Scene> {
    match name {
        "two-spheres" => Some(two_spheres()),
        "materials" => Some(materials()),
        "cover" => Some(cover(seed)),
        _ => None,
    }
}

fn add_sphere(world: &mut HittableList, center: Point3, radius: f64, material: &Arc<dyn Material>) {
    world.add(Box::new(Sphere::new(center, radius, Arc::clone(material))));
}

/// A small sphere resting on a huge one, seen from the origin.
fn two_spheres() -> Scene {
    let mut world = HittableList::new();

    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    add_sphere(&mut world, Point3::new(0.0, 0.0, -1.0), 0.5, &center);
    add_sphere(&mut world, Point3::new(0.0, -100.5, -1.0), 100.0, &ground);

    let camera = CameraConfig::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_lens(90.0, 0.0, 1.0);

    Scene { camera, world }
}

/// One sphere of each material, with a hollow glass sphere on the left.
fn materials() -> Scene {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let left: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    add_sphere(&mut world, Point3::new(0.0, -100.5, -1.0), 100.0, &ground);
    add_sphere(&mut world, Point3::new(0.0, 0.0, -1.2), 0.5, &center);
    add_sphere(&mut world, Point3::new(-1.0, 0.0, -1.0), 0.5, &left);
    add_sphere(&mut world, Point3::new(-1.0, 0.0, -1.0), 0.4, &bubble);
    add_sphere(&mut world, Point3::new(1.0, 0.0, -1.0), 0.5, &right);

    let camera = CameraConfig::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 10.0, 3.4);

    Scene { camera, world }
}

/// Random field of small spheres around three large ones.
fn cover(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    add_sphere(&mut world, Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground);

    // Small spheres share one glass material
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(&mut rng, 0.0, 1.0) * random_color(&mut rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };

            add_sphere(&mut world, center, 0.2, &material);
        }
    }

    let big_glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let big_matte: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let big_metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    add_sphere(&mut world, Point3::new(0.0, 1.0, 0.0), 1.0, &big_glass);
    add_sphere(&mut world, Point3::new(-4.0, 1.0, 0.0), 1.0, &big_matte);
    add_sphere(&mut world, Point3::new(4.0, 1.0, 0.0), 1.0, &big_metal);

    let camera = CameraConfig::default()
        .with_resolution(1200, 16.0 / 9.0)
        .with_quality(500, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene { camera, world }
}

fn random_color(rng: &mut StdRng, min: f64, max: f64) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}
