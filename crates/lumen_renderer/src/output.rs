//! Pixel sinks and the in-memory image buffer.

use std::path::Path;

use lumen_core::Color;

use crate::error::RenderResult;

/// Destination for rendered pixels.
pub trait ImageWriter {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Store the color of pixel (`col`, `row`); row 0 is the top of the image.
    fn write_pixel(&mut self, col: u32, row: u32, color: Color);
}

/// Clamp a channel to the displayable 0-255 range.
#[inline]
pub fn clamp_channel(x: f64) -> u8 {
    x.clamp(0.0, 255.0) as u8
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [
        clamp_channel(color.x),
        clamp_channel(color.y),
        clamp_channel(color.z),
        255,
    ]
}

/// Simple image buffer for storing render output.
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
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the buffer to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl ImageWriter for ImageBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.set(col, row, color);
    }
}
