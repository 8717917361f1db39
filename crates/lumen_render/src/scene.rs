//! Scene description loading.
//!
//! A scene file names its materials once and lets any number of spheres
//! refer to them, so spheres that share a name share one material instance.
//!
//! ```json
//! {
//!   "camera": { "image_width": 400, "look_from": [0, 0, 0] },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "glass": { "type": "dielectric", "refraction_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" }
//!   ]
//! }
//! ```

use crate::{CameraConfig, Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use lumen_math::{Color, Point3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading or assembling a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Serialized form of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { refraction_index: f64 },
}

impl MaterialDescription {
    /// Instantiate the material.
    pub fn build(&self) -> Arc<dyn Material> {
        match self {
            Self::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
            Self::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
            Self::Dielectric { refraction_index } => Arc::new(Dielectric::new(*refraction_index)),
        }
    }
}

/// Serialized form of a sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Point3,
    pub radius: f64,
    pub material: String,
}

/// A complete scene file: camera settings, named materials and spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

/// A ready-to-render scene.
pub struct Scene {
    pub camera: CameraConfig,
    pub world: HittableList,
}

impl SceneDescription {
    /// Load a scene description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse a scene description from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Instantiate materials and geometry.
    pub fn build(&self) -> SceneResult<Scene> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            if sphere.radius < 0.0 {
                log::warn!("Sphere {} has negative radius {}, clamping to 0", index, sphere.radius);
            }
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, Arc::clone(material))));
        }

        log::info!(
            "Built scene with {} materials and {} spheres",
            materials.len(),
            world.len()
        );

        Ok(Scene {
            camera: self.camera.clone(),
            world,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HitRecord, Hittable};
    use lumen_math::{Interval, Ray, Vec3};

    const TWO_SPHERES: &str = r#"{
        "camera": { "image_width": 40, "samples_per_pixel": 2 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "chrome": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.3 },
            "glass": { "type": "dielectric", "refraction_index": 1.5 }
        },
        "spheres": [
            { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": "chrome" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let desc = SceneDescription::from_json(TWO_SPHERES).unwrap();

        assert_eq!(desc.camera.image_width, 40);
        assert_eq!(desc.camera.samples_per_pixel, 2);
        assert_eq!(desc.materials.len(), 3);
        assert_eq!(
            desc.materials["glass"],
            MaterialDescription::Dielectric { refraction_index: 1.5 }
        );
        assert_eq!(desc.spheres[1].center, Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_build_scene() {
        let scene = SceneDescription::from_json(TWO_SPHERES).unwrap().build().unwrap();
        assert_eq!(scene.world.len(), 2);

        let ray = Ray::new(Point3::ZERO, -Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(scene.world.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_material() {
        let text = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": "gold" } ] }"#;
        let err = SceneDescription::from_json(text).unwrap().build().err().unwrap();

        match err {
            SceneError::UnknownMaterial { index, name } => {
                assert_eq!(index, 0);
                assert_eq!(name, "gold");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let err = SceneDescription::from_json(r#"{ "materials": { "x": { "type": "plastic" } } }"#);
        assert!(matches!(err, Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneDescription::load("/nonexistent/lumen/scene.json");
        assert!(matches!(err, Err(SceneError::Io(_))));
    }

    #[test]
    fn test_bundled_scene_files() {
        for text in [
            include_str!("../../../scenes/two_spheres.json"),
            include_str!("../../../scenes/materials.json"),
        ] {
            let scene = SceneDescription::from_json(text).unwrap().build().unwrap();
            assert!(!scene.world.is_empty());
            assert!(scene.camera.build().is_ok());
        }
    }

    #[test]
    fn test_empty_description_uses_default_camera() {
        let scene = SceneDescription::from_json("{}").unwrap().build().unwrap();
        assert!(scene.world.is_empty());
        assert_eq!(scene.camera, CameraConfig::default());
    }
}
