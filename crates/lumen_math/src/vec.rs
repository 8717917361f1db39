//! Vector aliases and the reflection/refraction helpers used by materials.

/// Free vector in 3-space.
pub type Vec3 = glam::DVec3;

/// A position in 3-space.
pub type Point3 = Vec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;

/// Components smaller than this count as zero in [`near_zero`].
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Returns true if every component of `v` is close to zero.
///
/// Used to catch scatter directions that cancel out and would normalize to NaN.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `eta_ratio` is the ratio of refractive indices (incident over transmitted).
/// The caller must rule out total internal reflection first; otherwise the
/// parallel component takes the square root of a negative number.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).sqrt() * n;
    r_out_perp + r_out_parallel
}
