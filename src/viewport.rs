// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes the affine mapping
//! from the integral pixel plane (origin at the upper-left corner) to
//! the complex cartesian plane: a zoom factor in pixels per plane
//! unit, and the plane coordinate sitting under pixel (0, 0).

use errors::ConfigError;
use num::Complex;

/// The window onto the complex plane.  Owned by the render loop;
/// mutation happens only through the command functions in
/// [`commands`](::commands), and never while a render pass is in
/// flight — the caller sequences "apply command, then render."
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Constructor.  `zoom` is pixels per plane unit and must be
    /// strictly positive; the offsets are the plane coordinate of the
    /// upper-left pixel and may be anything finite.
    pub fn new(zoom: f64, offset_x: f64, offset_y: f64) -> Result<Viewport, ConfigError> {
        if zoom <= 0.0 || !zoom.is_finite() {
            return Err(ConfigError::BadZoom { zoom });
        }
        Ok(Viewport {
            zoom,
            offset_x,
            offset_y,
        })
    }

    /// Internal constructor for the command functions, which preserve
    /// the positive-zoom invariant themselves (zoom is only ever
    /// multiplied by positive factors).
    pub(crate) fn from_parts(zoom: f64, offset_x: f64, offset_y: f64) -> Viewport {
        debug_assert!(zoom > 0.0);
        Viewport {
            zoom,
            offset_x,
            offset_y,
        }
    }

    /// Pixels per plane unit.  Always positive.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Plane x-coordinate under pixel column 0.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Plane y-coordinate under pixel row 0.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Given the column and row of a pixel, return the complex number
    /// at the equivalent location on the complex cartesian plane.
    pub fn to_complex(&self, px: usize, py: usize) -> Complex<f64> {
        Complex::new(
            (px as f64) / self.zoom + self.offset_x,
            (py as f64) / self.zoom + self.offset_y,
        )
    }
}
