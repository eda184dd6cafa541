// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frame's pixel storage: a flat row-major RGB byte buffer.  The
//! renderer fully overwrites one of these per pass and then hands it
//! to the presenter, read-only from that point on.

use errors::ConfigError;

/// Bytes per pixel: one each for red, green, blue.
pub const BYTES_PER_PIXEL: usize = 3;

/// A width x height image, rows stored top to bottom, three bytes per
/// pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer.  Both dimensions must be at least one
    /// pixel.
    pub fn new(width: usize, height: usize) -> Result<PixelBuffer, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::BadDimensions { width, height });
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes, row-major RGB, suitable for handing straight to
    /// an encoder or a presentation surface.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access for the renderer's disjoint band slices.
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// The RGB triple at a pixel coordinate.  Panics if the coordinate
    /// is outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height);
        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_fails_on_empty_dimensions() {
        assert!(PixelBuffer::new(0, 600).is_err());
        assert!(PixelBuffer::new(800, 0).is_err());
    }

    #[test]
    fn buffer_allocates_three_bytes_per_pixel() {
        let buffer = PixelBuffer::new(640, 480).unwrap();
        assert_eq!(buffer.as_bytes().len(), 640 * 480 * 3);
    }

    #[test]
    fn pixel_lookup_is_row_major() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        let offset = (2 * 4 + 1) * BYTES_PER_PIXEL;
        buffer.bytes_mut()[offset..offset + 3].copy_from_slice(&[9, 8, 7]);
        assert_eq!(buffer.pixel(1, 2), [9, 8, 7]);
        assert_eq!(buffer.pixel(2, 1), [0, 0, 0]);
    }
}
