//! Plain-text PPM (P3) framebuffer dumps.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes `rgb` as an ASCII PPM image.
///
/// `rgb` holds `width * height` RGB triples with the bottom row first, as
/// read back from the framebuffer. Rows are written top-down, one text line
/// per row.
pub fn write_ppm<W: Write>(out: &mut W, width: u32, height: u32, rgb: &[u8]) -> Result<(), String> {
    let (w, h) = (width as usize, height as usize);
    if rgb.len() != w * h * 3 {
        return Err(format!(
            "Pixel buffer holds {} bytes, expected {} for {}x{}",
            rgb.len(),
            w * h * 3,
            width,
            height
        ));
    }

    let io = |e: std::io::Error| e.to_string();
    write!(out, "P3\n{} {}\n255\n", width, height).map_err(io)?;
    for row in (0..h).rev() {
        let line = &rgb[row * w * 3..(row + 1) * w * 3];
        for pixel in line.chunks_exact(3) {
            write!(out, "{} {} {} ", pixel[0], pixel[1], pixel[2]).map_err(io)?;
        }
        writeln!(out).map_err(io)?;
    }
    out.flush().map_err(io)
}

/// Writes a PPM file to `path`.
pub fn save_ppm(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let mut out = BufWriter::new(file);
    write_ppm(&mut out, width, height, rgb)
}

/// Hands out screenshot file names `<prefix><id>.ppm` with increasing ids.
#[derive(Debug, Default)]
pub struct ScreenshotCounter {
    next_id: u32,
}

impl ScreenshotCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the next screenshot will get.
    pub fn peek(&self) -> u32 {
        self.next_id
    }

    /// Returns the path for the next screenshot and advances the counter.
    pub fn next_path(&mut self, prefix: &str) -> PathBuf {
        let path = PathBuf::from(format!("{}{}.ppm", prefix, self.next_id));
        self.next_id += 1;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_row_order() {
        // 2x2, bottom row first: bottom = red, green; top = blue, white.
        let rgb = [
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ];
        let mut out = Vec::new();
        write_ppm(&mut out, 2, 2, &rgb).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "P3\n2 2\n255\n0 0 255 255 255 255 \n255 0 0 0 255 0 \n"
        );
    }

    #[test]
    fn test_dimensions_match_header() {
        let (width, height) = (5u32, 3u32);
        let rgb = vec![7u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        write_ppm(&mut out, width, height, &rgb).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("5 3"));
        assert_eq!(lines.next(), Some("255"));
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), height as usize);
        for row in rows {
            assert_eq!(row.split_whitespace().count(), (width * 3) as usize);
        }
    }

    #[test]
    fn test_wrong_buffer_size_is_rejected() {
        let mut out = Vec::new();
        assert!(write_ppm(&mut out, 2, 2, &[0; 11]).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_screenshot_ids_increase() {
        let mut counter = ScreenshotCounter::new();
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.next_path("shot-"), PathBuf::from("shot-0.ppm"));
        assert_eq!(counter.next_path("shot-"), PathBuf::from("shot-1.ppm"));
        assert_eq!(counter.peek(), 2);
    }

    #[test]
    fn test_save_ppm_writes_file() {
        let path = std::env::temp_dir().join(format!("meshlight-test-{}.ppm", std::process::id()));
        save_ppm(&path, 1, 1, &[1, 2, 3]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "P3\n1 1\n255\n1 2 3 \n");
    }
}
