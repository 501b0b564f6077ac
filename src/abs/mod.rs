//! Thin wrappers around the SDL2 window and the OpenGL objects the viewer
//! uses: shaders, meshes, textures and framebuffer read-back.

pub mod app;
pub mod framebuffer;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use framebuffer::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
