//! The core of the Meshlight viewer. This crate contains everything that
//! does not need a graphics context: model and texture loading, light and
//! camera definitions, scene configuration and framebuffer dumps.

pub mod camera;
pub mod config;
pub mod light;
pub mod model;
pub mod ppm;
pub mod texture;

pub use camera::Camera;
pub use config::SceneConfig;
pub use light::{LightOrbit, MAX_SPOT_LIGHTS, PointLight, SpotLight};
pub use model::{ModelData, ModelVertex};
pub use ppm::ScreenshotCounter;
pub use texture::TextureData;
