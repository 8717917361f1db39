//! Lumen Renderer - CPU path tracing of sphere scenes.
//!
//! A Monte Carlo path tracer: the camera shoots jittered rays through each
//! pixel, surfaces scatter them according to their material, and the
//! recursion bottoms out in a sky gradient or the depth limit.

mod camera;
mod color;
mod hittable;
mod image_buffer;
mod material;
mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig, CameraError, CameraResult};
pub use color::{color_to_rgb8, linear_to_gamma};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use image_buffer::{ImageBuffer, OutputError, OutputResult};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use scene::{
    MaterialDescription, Scene, SceneDescription, SceneError, SceneResult, SphereDescription,
};
pub use sphere::Sphere;

/// Re-export the math primitives from lumen_math
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};
