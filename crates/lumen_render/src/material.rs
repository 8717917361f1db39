//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use lumen_math::{
    near_zero, random_f64, random_on_hemisphere, random_unit_vector, reflect, refract, Color,
    Ray,
};
use rand::RngCore;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Color multiplier applied to light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` with the attenuation and outgoing ray if the ray
    /// scatters, or `None` if it is absorbed. Absorbs by default.
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_on_hemisphere(rng, rec.normal);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough. Clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction(), rec.normal).normalize();
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzzed reflections that dip below the surface are absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Refractive index relative to the surrounding medium (1.0 = air, 1.5 = glass)
    refraction_index: f64,
}

impl Dielectric {
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    /// Snell's law has no solution past the critical angle.
    fn must_reflect(cos_theta: f64, relative_index: f64) -> bool {
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        relative_index * sin_theta > 1.0
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, relative_index: f64) -> f64 {
        let r0 = ((1.0 - relative_index) / (1.0 + relative_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let relative_index = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);

        let reflects = if Self::must_reflect(cos_theta, relative_index) {
            true
        } else {
            // Partial reflection is a separate draw so the feasibility check stays pure
            random_f64(rng) < Self::reflectance(cos_theta, relative_index)
        };

        let direction = if reflects {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, relative_index)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}
