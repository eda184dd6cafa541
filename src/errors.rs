//! Typed failures for construction and rendering.
//!
//! A render pass either hands back a complete buffer or one of these
//! errors; the engine never returns a partially painted frame.  The
//! presenter is expected to keep showing the previous valid frame when
//! a pass fails.

use std::time::Duration;

/// Rejected configuration, caught before any render work starts.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Image dimensions must both be at least one pixel.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    BadDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The iteration cap must be at least one.
    #[fail(display = "iteration cap must be positive")]
    BadIterationCap,

    /// Zoom is pixels-per-plane-unit and must be strictly positive.
    #[fail(display = "zoom must be positive, got {}", zoom)]
    BadZoom {
        /// The rejected zoom value.
        zoom: f64,
    },
}

/// A render pass that started but did not produce a complete frame.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The pass hit its deadline with work units still unclaimed.  The
    /// caller may retry the same viewport, or lower the iteration cap.
    #[fail(
        display = "render pass exceeded its {:?} deadline with {} work units unfinished",
        deadline, unfinished
    )]
    Timeout {
        /// The deadline that elapsed.
        deadline: Duration,
        /// Number of work units never rendered.
        unfinished: usize,
    },

    /// One or more work units panicked.  Every failed unit is listed,
    /// not just the first.
    #[fail(display = "work units {:?} failed during the render pass", units)]
    WorkerPanic {
        /// Indices of the failed units, ascending.
        units: Vec<usize>,
    },
}
