//! Frame buffers filled by a render pass.

use crate::post::to_rgba8;
use raycast_math::Color;

/// Display-ready pixels in two forms: linear floats (after tone mapping and
/// gamma) and the quantized RGBA8 copy handed to viewers.
///
/// Both are row-major with row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    rgba: Vec<u8>,
}

impl Frame {
    /// Create a black, fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; count],
            rgba: vec![0; count * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// RGBA8 value at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }

    /// Store a finished color in both buffers.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
        self.rgba[i * 4..i * 4 + 4].copy_from_slice(&to_rgba8(color));
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Replace the float buffer and requantize every pixel.
    ///
    /// Ignored if `pixels` has the wrong length.
    pub fn replace_pixels(&mut self, pixels: Vec<Color>) {
        if pixels.len() != self.pixels.len() {
            log::warn!(
                "Frame buffer size mismatch ({} vs {}), keeping old pixels",
                pixels.len(),
                self.pixels.len()
            );
            return;
        }
        self.pixels = pixels;
        for (rgba, color) in self.rgba.chunks_exact_mut(4).zip(&self.pixels) {
            rgba.copy_from_slice(&to_rgba8(*color));
        }
    }

    /// Hand the RGBA8 buffer to an `image` buffer for encoding.
    pub fn into_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.rgba)
    }
}
