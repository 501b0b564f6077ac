//! CPU-side texture images.
//!
//! The [`TextureData`] struct holds tightly packed RGBA8 pixels, bottom row
//! first, so it can be handed to the graphics API as is.

use std::path::Path;

use image::DynamicImage;

/// Decoded texture pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Decodes an image file and flips it vertically.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| format!("Failed to load texture {}: {}", path.display(), e))?;
        Ok(Self::from_image(image))
    }

    /// Converts an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        let rgba = image.flipv().into_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }

    /// A single pixel texture of the given colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn test_image_is_flipped_and_expanded_to_rgba() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));
        image.put_pixel(1, 1, Rgb([9, 9, 9]));

        let data = TextureData::from_image(DynamicImage::ImageRgb8(image));
        assert_eq!((data.width, data.height), (2, 2));
        assert_eq!(data.pixels.len(), 16);
        // The image's bottom row comes first.
        assert_eq!(&data.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&data.pixels[4..8], &[9, 9, 9, 255]);
        assert_eq!(&data.pixels[8..12], &[255, 0, 0, 255]);
        assert_eq!(&data.pixels[12..16], &[0, 255, 0, 255]);
    }

    #[test]
    fn test_solid_texture() {
        let data = TextureData::solid([255, 255, 255, 255]);
        assert_eq!((data.width, data.height), (1, 1));
        assert_eq!(data.pixels, vec![255; 4]);
    }

    #[test]
    fn test_missing_texture_reports_path() {
        let err = TextureData::load("./no/such/texture.png").unwrap_err();
        assert!(err.contains("texture.png"));
    }
}
