use crate::intensity::IntensityBuffer;
use crate::palette::{Palette, Rgba};

/// Write RGBA pixel to slice (R, G, B, A byte order)
#[inline]
fn write_pixel_rgba(dest: &mut [u8], color: Rgba) {
    dest.copy_from_slice(&color.to_bytes());
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Packed RGBA frame, 4 bytes per pixel, top-left origin, row-major.
/// This is the frame handed to the window and to the capture writer.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer (transparent black)
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Read all 4 channels of a pixel, or None if out of bounds
    #[inline]
    pub fn get_pixel_rgba(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(Rgba::new(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ))
        } else {
            None
        }
    }

    /// Overwrite the frame with the palette color of every intensity cell.
    ///
    /// Indices past the end of the palette (left over from a switch to a
    /// shorter palette) render as the last entry. Cells beyond the smaller of
    /// the two buffers are skipped.
    pub fn apply_palette(&mut self, intensity: &IntensityBuffer, palette: &Palette) {
        for (pixel, &index) in self.pixels.chunks_exact_mut(4).zip(intensity.cells()) {
            write_pixel_rgba(pixel, palette.color_at(index as usize));
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }
}
