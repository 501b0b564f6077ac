//! Loading models from disk and uploading them to the GPU.

use std::sync::Arc;

use glow::HasContext;
use meshlight_core::{ModelData, ModelVertex, TextureData, config::MeshConfig, model::load_obj};
use rayon::prelude::*;

use crate::abs::{Mesh, Texture, Vertex};

impl Vertex for ModelVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ModelVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Normal attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(ModelVertex, normal) as i32,
            );

            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(ModelVertex, tex_coord) as i32,
            );
        }
    }
}

/// A model decoded on the CPU, waiting to be uploaded.
pub struct LoadedModel {
    pub model: ModelData,
    pub texture: TextureData,
}

/// Loads one model and its texture. A texture that fails to load is
/// replaced by plain white so the geometry still shows up.
pub fn load_model(config: &MeshConfig) -> Result<LoadedModel, String> {
    let model = load_obj(&config.obj)?;
    let texture = TextureData::load(&config.texture).unwrap_or_else(|e| {
        log::warn!("{}; drawing {} untextured", e, config.obj.display());
        TextureData::solid([255, 255, 255, 255])
    });
    Ok(LoadedModel { model, texture })
}

/// Decodes all configured models in parallel. Models that fail to load are
/// logged and left out; the order of the remaining ones is kept.
pub fn load_models(configs: &[MeshConfig]) -> Vec<LoadedModel> {
    let start = std::time::Instant::now();

    let loaded: Vec<_> = configs
        .par_iter()
        .filter_map(|config| match load_model(config) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        })
        .collect();

    log::info!(
        "Loaded {} of {} models in {:?}",
        loaded.len(),
        configs.len(),
        start.elapsed()
    );

    loaded
}

/// A model living on the GPU.
pub struct RenderModel {
    pub name: String,
    mesh: Mesh,
    texture: Texture,
}

impl RenderModel {
    /// Uploads a decoded model. Must be called on the thread owning the
    /// GL context.
    pub fn upload(gl: &Arc<glow::Context>, loaded: &LoadedModel) -> Result<Self, String> {
        let mesh = Mesh::new(gl, &loaded.model.vertices, glow::TRIANGLES)?;
        let texture = Texture::new(gl, &loaded.texture)?;
        log::debug!(
            "Uploaded {}: {} vertices, {}x{} texture",
            loaded.model.name,
            mesh.vertex_count(),
            texture.width(),
            texture.height()
        );
        Ok(Self {
            name: loaded.model.name.clone(),
            mesh,
            texture,
        })
    }

    /// Binds the texture to unit 0 and draws the mesh.
    pub fn render(&self) {
        self.texture.bind(0);
        self.mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<ModelVertex>(), 32);
        assert_eq!(std::mem::offset_of!(ModelVertex, normal), 12);
        assert_eq!(std::mem::offset_of!(ModelVertex, tex_coord), 24);
    }

    #[test]
    fn test_missing_texture_falls_back_to_white() {
        let obj = std::env::temp_dir().join(format!("meshlight-fallback-{}.obj", std::process::id()));
        std::fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let configs = vec![MeshConfig {
            obj: obj.clone(),
            texture: "./no/such/texture.png".into(),
        }];

        let loaded = load_models(&configs);
        std::fs::remove_file(&obj).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].model.triangle_count(), 1);
        assert_eq!(loaded[0].texture, TextureData::solid([255; 4]));
    }

    #[test]
    fn test_missing_models_are_skipped() {
        let configs = vec![MeshConfig {
            obj: "./no/such/model.obj".into(),
            texture: "./no/such/texture.png".into(),
        }];
        assert!(load_models(&configs).is_empty());
    }
}
