//! Render output buffer and image writers.

use crate::color::color_to_rgb8;
use lumen_math::Color;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Image buffer size mismatch for {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Linear color image, row-major, top row first.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-encoded 8-bit RGB bytes in row-major order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    /// Write the image as a plain-text PPM (P3) stream.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> OutputResult<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        for color in &self.pixels {
            let [r, g, b] = color_to_rgb8(*color);
            writeln!(out, "{} {} {}", r, g, b)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Save to `path`. A `.png` extension is PNG-encoded, anything else is written as PPM.
    pub fn save(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            let rgb = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
                OutputError::SizeMismatch {
                    width: self.width,
                    height: self.height,
                },
            )?;
            rgb.save_with_format(path, image::ImageFormat::Png)?;
        } else {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut writer)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.1, 0.2, 0.3));

        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.pixels[5], Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 255\n");
    }

    #[test]
    fn test_to_rgb8_layout() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 1, Color::ONE);

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[9..12], &[255, 255, 255]);
        assert!(bytes[..9].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_save_png_and_ppm() {
        let dir = std::env::temp_dir().join(format!("lumen_output_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::new(1.0, 0.5, 0.0));

        let png = dir.join("out.png");
        image.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(3, 2).0, color_to_rgb8(Color::new(1.0, 0.5, 0.0)));

        let ppm = dir.join("out.ppm");
        image.save(&ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n4 3\n255\n"));
        assert_eq!(text.lines().count(), 3 + 12);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
