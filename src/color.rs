// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color policy: turning an iteration count into a pixel.  Any pure
//! function of the count alone will do; the renderer only requires
//! determinism, so that identical frames come out byte-identical no
//! matter how the work was scheduled.

/// A mapping from escape-time iteration counts to RGB.  Implementors
/// must be pure: no hidden state, identical inputs to identical
/// outputs.  `Sync` because one map is shared by every worker in a
/// render pass.
pub trait ColorMap: Sync {
    /// The RGB triple for a pixel whose orbit ran `iterations` steps.
    fn color_for(&self, iterations: u32) -> [u8; 3];
}

/// The default palette: the iteration count modulo 256 on all three
/// channels.  Periodic rather than monotonic, which gives the exterior
/// bands their sawtooth shading, and paints a 256-iteration member of
/// the set black.
#[derive(Copy, Clone, Debug, Default)]
pub struct Grayscale;

impl ColorMap for Grayscale {
    fn color_for(&self, iterations: u32) -> [u8; 3] {
        let level = (iterations % 256) as u8;
        [level, level, level]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_is_the_count_on_every_channel() {
        assert_eq!(Grayscale.color_for(0), [0, 0, 0]);
        assert_eq!(Grayscale.color_for(7), [7, 7, 7]);
        assert_eq!(Grayscale.color_for(255), [255, 255, 255]);
    }

    #[test]
    fn grayscale_wraps_at_256() {
        // The full 256-iteration cap lands on black, same as zero.
        assert_eq!(Grayscale.color_for(256), [0, 0, 0]);
        assert_eq!(Grayscale.color_for(257), [1, 1, 1]);
    }
}
