//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so callers control seeding
//! and each render worker can own its own stream.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform double in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform double in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling on the [-1, 1]^2 square
    loop {
        let p = Vec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform unit vector on the surface of the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling in the cube, then project onto the sphere.
    // Tiny vectors are rejected too so the division cannot blow up.
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Unit vector on the hemisphere around `normal`.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}
