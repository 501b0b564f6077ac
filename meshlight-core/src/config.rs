//! Scene configuration.
//!
//! A scene is described by a JSON file; every field is optional and falls
//! back to the built-in scene.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Camera, LightOrbit, PointLight, SpotLight};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Meshlight".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// One model to load: geometry plus the texture applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub obj: PathBuf,
    pub texture: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub meshes: Vec<MeshConfig>,
    pub camera: Camera,
    pub point_light: PointLight,
    pub orbit: LightOrbit,
    pub spot_lights: Vec<SpotLight>,
    pub clear_color: Vec3,
    pub screenshot_prefix: String,
    pub wireframe: bool,
    pub cull_faces: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            meshes: vec![MeshConfig {
                obj: PathBuf::from("./asset/bucket.obj"),
                texture: PathBuf::from("./asset/bucket.jpg"),
            }],
            camera: Camera::default(),
            point_light: PointLight::default(),
            orbit: LightOrbit::default(),
            spot_lights: Vec::new(),
            clear_color: Vec3::new(0.3, 0.4, 0.5),
            screenshot_prefix: "screenshot-".to_string(),
            wireframe: false,
            cull_faces: true,
        }
    }
}

impl SceneConfig {
    /// Reads a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Parses a scene from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }
}
