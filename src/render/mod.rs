//! The lit forward renderer: one point light plus up to
//! [`MAX_SPOT_LIGHTS`] spotlights, diffuse shading, one texture per model.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use meshlight_core::{Camera, MAX_SPOT_LIGHTS, PointLight, SpotLight};

use crate::abs::ShaderProgram;

pub mod model;

pub use model::RenderModel;

macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        ShaderProgram::from_sources(
            $gl,
            include_str!(concat!("shaders/", stringify!($name), "/vert.glsl")),
            include_str!(concat!("shaders/", stringify!($name), "/frag.glsl")),
        )
    };
}

pub struct LitRenderer {
    program: ShaderProgram,
}

impl LitRenderer {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = shader_program!(lit, gl)?;
        program.use_program();
        program.set_uniform("tex", 0);
        program.set_uniform("model", Mat4::IDENTITY);
        Ok(Self { program })
    }

    /// Uploads view and projection for a viewport of the given size.
    pub fn set_camera(&self, camera: &Camera, width: u32, height: u32) {
        self.program.use_program();
        self.program.set_uniform("view", camera.view());
        self.program.set_uniform("projection", camera.projection(width, height));
    }

    pub fn set_point_light(&self, light: &PointLight) {
        self.program.use_program();
        self.program.set_uniform("pointLight.position", light.position);
        self.program.set_uniform("pointLight.attenuation", light.attenuation);
        self.program.set_uniform("pointLight.ambient", light.ambient);
        self.program.set_uniform("pointLight.diffuse", light.diffuse);
    }

    /// Only moves the point light; the rest of its properties stay as set.
    pub fn set_point_light_position(&self, position: Vec3) {
        self.program.use_program();
        self.program.set_uniform("pointLight.position", position);
    }

    /// Uploads the spotlights. Lights beyond [`MAX_SPOT_LIGHTS`] are ignored.
    pub fn set_spot_lights(&self, lights: &[SpotLight]) {
        if lights.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spotlights configured, only the first {} are used",
                lights.len(),
                MAX_SPOT_LIGHTS
            );
        }
        let lights = &lights[..lights.len().min(MAX_SPOT_LIGHTS)];

        self.program.use_program();
        for (i, light) in lights.iter().enumerate() {
            let field = |name: &str| format!("spotLights[{}].{}", i, name);
            self.program.set_uniform(&field("ambient"), light.ambient);
            self.program.set_uniform(&field("diffuse"), light.diffuse);
            self.program.set_uniform(&field("attenuation"), light.attenuation);
            self.program.set_uniform(&field("position"), light.position);
            self.program.set_uniform(&field("direction"), light.direction);
            self.program.set_uniform(&field("cutoff"), light.cutoff);
        }
        self.program.set_uniform("numSpotLights", lights.len() as i32);
    }

    /// Draws every model with the current uniforms.
    pub fn draw(&self, models: &[RenderModel]) {
        self.program.use_program();
        for model in models {
            model.render();
        }
    }
}
