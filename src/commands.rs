// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Navigation commands and the controller functions that apply them to
//! a [`Viewport`].  Commands are discrete: the platform layer maps
//! whatever input it has (keystrokes, buttons, a script) onto these
//! six, and applies them one at a time between render passes.

use std::str::FromStr;
use viewport::Viewport;

/// Pan distance in pixels per pan command.  Dividing by the current
/// zoom turns it into plane units, so panning covers the same fraction
/// of the screen at every magnification.
pub const PAN_STEP_PIXELS: f64 = 4.0;

/// Magnification applied by one zoom-in command; zoom-out applies its
/// reciprocal, so the two cancel exactly.
pub const ZOOM_STEP: f64 = 1.01;

/// One discrete navigation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Shift the view left by [`PAN_STEP_PIXELS`].
    PanLeft,
    /// Shift the view right by [`PAN_STEP_PIXELS`].
    PanRight,
    /// Shift the view up by [`PAN_STEP_PIXELS`].
    PanUp,
    /// Shift the view down by [`PAN_STEP_PIXELS`].
    PanDown,
    /// Magnify by [`ZOOM_STEP`], anchored at the image center.
    ZoomIn,
    /// Shrink by 1/[`ZOOM_STEP`], anchored at the image center.
    ZoomOut,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Command, String> {
        match s {
            "left" => Ok(Command::PanLeft),
            "right" => Ok(Command::PanRight),
            "up" => Ok(Command::PanUp),
            "down" => Ok(Command::PanDown),
            "in" => Ok(Command::ZoomIn),
            "out" => Ok(Command::ZoomOut),
            _ => Err(format!("unknown navigation command: {}", s)),
        }
    }
}

/// Shift the viewport by a pixel delta, converted to plane units at
/// the current zoom.  Positive dx moves the view right, positive dy
/// moves it down, matching screen coordinates.  Zoom is unchanged.
pub fn pan(viewport: &Viewport, dx_pixels: f64, dy_pixels: f64) -> Viewport {
    Viewport::from_parts(
        viewport.zoom(),
        viewport.offset_x() + dx_pixels / viewport.zoom(),
        viewport.offset_y() + dy_pixels / viewport.zoom(),
    )
}

/// Rescale the viewport by `factor` (which must be positive) while
/// keeping the plane point under the anchor pixel fixed.  The anchor
/// maps to the same complex number before and after the zoom; that is
/// the defining property of zoom-to-point.
pub fn zoom_at_anchor(
    viewport: &Viewport,
    anchor_x: usize,
    anchor_y: usize,
    factor: f64,
) -> Viewport {
    let old_zoom = viewport.zoom();
    let new_zoom = old_zoom * factor;
    let ax = anchor_x as f64;
    let ay = anchor_y as f64;
    Viewport::from_parts(
        new_zoom,
        (ax / old_zoom + viewport.offset_x()) - ax / new_zoom,
        (ay / old_zoom + viewport.offset_y()) - ay / new_zoom,
    )
}

/// Apply one navigation command, producing the next viewport.  Zoom
/// commands anchor at the center of a `width` x `height` image; pan
/// commands ignore the dimensions.
pub fn apply_command(
    viewport: &Viewport,
    command: Command,
    width: usize,
    height: usize,
) -> Viewport {
    match command {
        Command::PanLeft => pan(viewport, -PAN_STEP_PIXELS, 0.0),
        Command::PanRight => pan(viewport, PAN_STEP_PIXELS, 0.0),
        Command::PanUp => pan(viewport, 0.0, -PAN_STEP_PIXELS),
        Command::PanDown => pan(viewport, 0.0, PAN_STEP_PIXELS),
        Command::ZoomIn => zoom_at_anchor(viewport, width / 2, height / 2, ZOOM_STEP),
        Command::ZoomOut => zoom_at_anchor(viewport, width / 2, height / 2, 1.0 / ZOOM_STEP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn pan_steps_are_four_pixels_worth_of_plane() {
        let v = Viewport::new(200.0, -2.0, -2.0).unwrap();
        let panned = apply_command(&v, Command::PanRight, 800, 800);
        assert_eq!(panned.zoom(), 200.0);
        assert_eq!(panned.offset_x(), -2.0 + 4.0 / 200.0);
        assert_eq!(panned.offset_y(), -2.0);
    }

    #[test]
    fn vertical_pan_moves_only_the_y_offset() {
        let v = Viewport::new(50.0, 0.0, 0.0).unwrap();
        let up = apply_command(&v, Command::PanUp, 800, 800);
        assert_eq!(up.offset_x(), 0.0);
        assert_eq!(up.offset_y(), -4.0 / 50.0);
        let down = apply_command(&v, Command::PanDown, 800, 800);
        assert_eq!(down.offset_y(), 4.0 / 50.0);
    }

    #[test]
    fn opposite_pans_cancel() {
        let v = Viewport::new(200.0, -2.0, -2.0).unwrap();
        let back = pan(&pan(&v, PAN_STEP_PIXELS, 0.0), -PAN_STEP_PIXELS, 0.0);
        assert!(close(back.offset_x(), v.offset_x()));
        assert!(close(back.offset_y(), v.offset_y()));
    }

    #[test]
    fn zoom_preserves_the_point_under_the_anchor() {
        let v = Viewport::new(200.0, -2.0, -2.0).unwrap();
        for &(ax, ay) in &[(400, 400), (0, 0), (799, 13)] {
            let before = v.to_complex(ax, ay);
            let zoomed = zoom_at_anchor(&v, ax, ay, 1.01);
            let after = zoomed.to_complex(ax, ay);
            assert!(close(before.re, after.re));
            assert!(close(before.im, after.im));
        }
    }

    #[test]
    fn zoom_in_then_out_returns_to_the_original_view() {
        let v = Viewport::new(200.0, -2.0, -2.0).unwrap();
        let there = apply_command(&v, Command::ZoomIn, 800, 800);
        let back = apply_command(&there, Command::ZoomOut, 800, 800);
        assert!(close(back.zoom(), v.zoom()));
        assert!(close(back.offset_x(), v.offset_x()));
        assert!(close(back.offset_y(), v.offset_y()));
    }

    #[test]
    fn zoom_in_magnifies() {
        let v = Viewport::new(200.0, -2.0, -2.0).unwrap();
        let zoomed = apply_command(&v, Command::ZoomIn, 800, 800);
        assert!(zoomed.zoom() > v.zoom());
    }

    #[test]
    fn commands_parse_from_their_script_names() {
        assert_eq!("left".parse::<Command>().unwrap(), Command::PanLeft);
        assert_eq!("right".parse::<Command>().unwrap(), Command::PanRight);
        assert_eq!("up".parse::<Command>().unwrap(), Command::PanUp);
        assert_eq!("down".parse::<Command>().unwrap(), Command::PanDown);
        assert_eq!("in".parse::<Command>().unwrap(), Command::ZoomIn);
        assert_eq!("out".parse::<Command>().unwrap(), Command::ZoomOut);
        assert!("sideways".parse::<Command>().is_err());
    }
}
