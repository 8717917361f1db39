//! Camera configuration, ray generation and the path tracing loop.

use crate::{HitRecord, Hittable, ImageBuffer};
use lumen_math::{random_f64, random_in_unit_disk, Color, Interval, Point3, Ray, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Hits closer than this are ignored so a scattered ray cannot re-hit the
/// surface it just left (shadow acne).
const MIN_HIT_DISTANCE: f64 = 0.001;

/// Errors from validating a camera configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("Focus distance must be positive and finite, got {0}")]
    InvalidFocusDistance(f64),

    #[error("Defocus angle must be non-negative, got {0}")]
    NegativeDefocusAngle(f64),

    #[error("Camera position and look-at target coincide")]
    DegenerateView,

    #[error("Up vector is parallel to the view direction")]
    DegenerateUp,
}

pub type CameraResult<T> = Result<T, CameraError>;

/// User-facing camera settings.
///
/// Turn it into a [`Camera`] with [`CameraConfig::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    // Image settings
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,          // Vertical field of view in degrees
    pub defocus_angle: f64, // Variation angle of rays through each pixel
    pub focus_dist: f64,    // Distance from camera to plane of perfect focus
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Validate the settings and derive the viewport and lens geometry.
    pub fn build(&self) -> CameraResult<Camera> {
        if self.image_width == 0 {
            return Err(CameraError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::ZeroSamples);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.defocus_angle >= 0.0) {
            return Err(CameraError::NegativeDefocusAngle(self.defocus_angle));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 {
            return Err(CameraError::DegenerateView);
        }
        let w = view.normalize();
        let side = self.vup.cross(w);
        if side.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateUp);
        }

        // Camera basis: u right, v up, w opposite the view direction
        let u = side.normalize();
        let v = w.cross(u);

        let image_width = self.image_width;
        let image_height = self.image_height();
        let center = self.look_from;

        // Viewport dimensions at the focus plane
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Viewport edges, v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left = center - self.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();

        Ok(Camera {
            image_width,
            image_height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            defocus_angle: self.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        })
    }
}

/// An initialized camera. All derived state is fixed at build time, so one
/// camera can be shared read-only by every render worker.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    defocus_angle: f64,

    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Eye position; every ray starts here when defocus is disabled.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame (right, up, backward).
    pub fn frame(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate a jittered ray through pixel (i, j).
    ///
    /// The ray starts at the camera center, or at a random point on the
    /// defocus disk when depth of field is enabled.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + (i as f64 + offset.x) * self.pixel_delta_u
            + (j as f64 + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Average of `samples_per_pixel` path samples through pixel (i, j).
    pub fn get_pixel_color(
        &self,
        i: u32,
        j: u32,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut pixel_color = Color::ZERO;

        for _ in 0..self.samples_per_pixel {
            let ray = self.get_ray(i, j, rng);
            pixel_color += self.ray_color(&ray, world, self.max_depth, rng);
        }

        pixel_color / self.samples_per_pixel as f64
    }

    /// Compute the color seen by a ray.
    ///
    /// Follows the ray through up to `depth` scattering events, multiplying
    /// in each surface's attenuation. Absorbed rays and rays that run out of
    /// depth contribute black; rays that escape see the sky.
    pub fn ray_color(
        &self,
        ray: &Ray,
        world: &dyn Hittable,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        let mut rec = HitRecord::default();

        if !world.hit(ray, Interval::new(MIN_HIT_DISTANCE, f64::INFINITY), &mut rec) {
            return sky_gradient(ray);
        }

        match rec.material.scatter(ray, &rec, rng) {
            Some(result) => {
                result.attenuation * self.ray_color(&result.scattered, world, depth - 1, rng)
            }
            None => Color::ZERO,
        }
    }

    /// Render the whole image.
    ///
    /// Rows are traced in parallel. Each row draws from its own generator
    /// seeded from `seed` and the row index, so the output depends only on
    /// the seed and not on how rows are scheduled.
    pub fn render(&self, world: &dyn Hittable, seed: u64) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.image_width, self.image_height);
        let remaining = AtomicU32::new(self.image_height);
        let start = Instant::now();

        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            self.max_depth
        );

        image
            .pixels
            .par_chunks_mut(self.image_width as usize)
            .enumerate()
            .for_each(|(j, row)| {
                let mut rng = StdRng::seed_from_u64(row_seed(seed, j as u32));
                for (i, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.get_pixel_color(i as u32, j as u32, world, &mut rng);
                }

                let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
                log::debug!("Scanlines remaining: {}", left);
            });

        log::info!("Rendered in {:?}", start.elapsed());
        image
    }
}

/// Per-row seed. The odd multiplier spreads consecutive rows across the seed space.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Vertical white to sky-blue gradient on the ray's normalized direction.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}
