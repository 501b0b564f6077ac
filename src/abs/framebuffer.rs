//! Reading back the default framebuffer.

use glow::HasContext;

/// Reads the RGB contents of the default framebuffer.
///
/// The returned buffer holds `width * height` tightly packed triples, bottom
/// row first.
pub fn read_framebuffer(gl: &glow::Context, width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    unsafe {
        gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGB,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(pixels.as_mut_slice())),
        );
    }
    pixels
}
