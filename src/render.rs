// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel renderer.  A frame is cut into work units — bands of
//! whole rows, which are the contiguous disjoint slices a row-major
//! buffer can give out — and a fixed pool of worker threads drains the
//! unit queue until the frame is done or the deadline passes.  Because
//! every pixel is a pure function of its own coordinate, the finished
//! buffer is byte-identical no matter how many workers ran or in what
//! order they claimed units.

extern crate crossbeam;
extern crate num_cpus;

use std::cmp;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use buffer::{PixelBuffer, BYTES_PER_PIXEL};
use color::{ColorMap, Grayscale};
use errors::{ConfigError, RenderError};
use escape::EscapeTime;
use failure::Error;
use viewport::Viewport;

/// How long a render pass may run before it is reported as timed out.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

// Aim for several units per worker so a band of slow interior pixels
// doesn't leave the rest of the pool idle.
const UNITS_PER_WORKER: usize = 4;

/// Renders frames of a fixed size.  Construct once, render once per
/// navigation command; the caller sequences passes, so a new pass
/// never starts while one is in flight.
#[derive(Debug)]
pub struct Renderer {
    width: usize,
    height: usize,
    threads: usize,
    deadline: Duration,
}

impl Renderer {
    /// Constructor.  Dimensions must both be positive; the worker pool
    /// defaults to one thread per available CPU and the deadline to
    /// [`DEFAULT_DEADLINE`].
    pub fn new(width: usize, height: usize) -> Result<Renderer, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::BadDimensions { width, height });
        }
        Ok(Renderer {
            width,
            height,
            threads: num_cpus::get(),
            deadline: DEFAULT_DEADLINE,
        })
    }

    /// Override the worker pool size.  Clamped to at least one thread.
    pub fn with_threads(mut self, threads: usize) -> Renderer {
        self.threads = cmp::max(1, threads);
        self
    }

    /// Override the render deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Renderer {
        self.deadline = deadline;
        self
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Render one frame.  Blocks until every work unit has completed,
    /// then returns the fully painted buffer.  If the deadline elapses
    /// first, or any unit panics, the pass fails as a whole: failures
    /// are aggregated into a single error and no partial buffer is
    /// ever returned.  The presenter should keep showing its previous
    /// frame on failure.
    pub fn render<C: ColorMap>(
        &self,
        viewport: &Viewport,
        escape: &EscapeTime,
        colors: &C,
    ) -> Result<PixelBuffer, RenderError> {
        let mut buffer = PixelBuffer::new(self.width, self.height)
            .expect("dimensions were validated at construction");
        let rows_per_band = cmp::max(1, self.height / (self.threads * UNITS_PER_WORKER));
        let band_bytes = rows_per_band * self.width * BYTES_PER_PIXEL;

        let unfinished;
        let mut failed_units;
        let timed_out;
        {
            let units: Vec<(usize, &mut [u8])> = buffer
                .bytes_mut()
                .chunks_mut(band_bytes)
                .enumerate()
                .collect();
            let queue = Mutex::new(units);
            let failed = Mutex::new(Vec::new());
            let deadline_hit = AtomicBool::new(false);
            let start = Instant::now();

            crossbeam::scope(|spawner| {
                for _ in 0..self.threads {
                    spawner.spawn(|_| loop {
                        // Units run to completion once claimed; the
                        // deadline is only consulted between units.
                        if start.elapsed() >= self.deadline {
                            deadline_hit.store(true, Ordering::SeqCst);
                            break;
                        }
                        let unit = { queue.lock().unwrap().pop() };
                        match unit {
                            Some((index, band)) => {
                                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                                    render_band(
                                        band,
                                        index * rows_per_band,
                                        self.width,
                                        viewport,
                                        escape,
                                        colors,
                                    )
                                }));
                                if outcome.is_err() {
                                    failed.lock().unwrap().push(index);
                                }
                            }
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .unwrap();

            unfinished = queue.into_inner().unwrap().len();
            failed_units = failed.into_inner().unwrap();
            timed_out = deadline_hit.into_inner();
        }

        if !failed_units.is_empty() {
            failed_units.sort();
            return Err(RenderError::WorkerPanic {
                units: failed_units,
            });
        }
        if timed_out && unfinished > 0 {
            return Err(RenderError::Timeout {
                deadline: self.deadline,
                unfinished,
            });
        }
        Ok(buffer)
    }
}

/// Paint one band of whole rows.  `first_row` is the image row of the
/// band's first slice row; every pixel is computed from its absolute
/// coordinate, which is what makes the output scheduling-independent.
fn render_band(
    band: &mut [u8],
    first_row: usize,
    width: usize,
    viewport: &Viewport,
    escape: &EscapeTime,
    colors: &ColorMap,
) {
    for (row_offset, row) in band.chunks_mut(width * BYTES_PER_PIXEL).enumerate() {
        let py = first_row + row_offset;
        for (px, pixel) in row.chunks_mut(BYTES_PER_PIXEL).enumerate() {
            let c = viewport.to_complex(px, py);
            let color = colors.color_for(escape.iterations(c));
            pixel.copy_from_slice(&color);
        }
    }
}

/// One-shot convenience wrapper over the whole engine: build a
/// renderer and evaluator for the given dimensions and cap, render a
/// single frame with the default grayscale palette.
pub fn render_frame(
    viewport: &Viewport,
    width: usize,
    height: usize,
    iteration_cap: u32,
) -> Result<PixelBuffer, Error> {
    let renderer = Renderer::new(width, height)?;
    let escape = EscapeTime::new(iteration_cap)?;
    Ok(renderer.render(viewport, &escape, &Grayscale)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A palette that never emits the buffer's zeroed initial value,
    // so untouched pixels would show through.
    struct Sentinel;
    impl ColorMap for Sentinel {
        fn color_for(&self, _iterations: u32) -> [u8; 3] {
            [7, 7, 7]
        }
    }

    struct Explosive;
    impl ColorMap for Explosive {
        fn color_for(&self, _iterations: u32) -> [u8; 3] {
            panic!("bad palette");
        }
    }

    fn whole_set_view() -> Viewport {
        Viewport::new(200.0, -2.0, -2.0).unwrap()
    }

    #[test]
    fn renderer_rejects_empty_dimensions() {
        assert!(Renderer::new(0, 800).is_err());
        assert!(Renderer::new(800, 0).is_err());
    }

    #[test]
    fn every_pixel_is_written_exactly_once() {
        // Odd dimensions so the band partition has a remainder.
        let renderer = Renderer::new(33, 17).unwrap().with_threads(3);
        let buffer = renderer
            .render(&whole_set_view(), &EscapeTime::default(), &Sentinel)
            .unwrap();
        assert!(buffer.as_bytes().iter().all(|&b| b == 7));
    }

    #[test]
    fn output_is_identical_for_any_worker_count() {
        let viewport = Viewport::new(25.0, -2.0, -2.0).unwrap();
        let escape = EscapeTime::default();
        let serial = Renderer::new(64, 64)
            .unwrap()
            .with_threads(1)
            .render(&viewport, &escape, &Grayscale)
            .unwrap();
        let parallel = Renderer::new(64, 64)
            .unwrap()
            .with_threads(4)
            .render(&viewport, &escape, &Grayscale)
            .unwrap();
        assert_eq!(serial.as_bytes(), parallel.as_bytes());
    }

    #[test]
    fn the_plane_origin_renders_black_in_the_classic_view() {
        // 800x800, zoom 200, offsets -2.0: pixel (400, 400) is the
        // plane origin, a set member, so it runs the full 256
        // iterations and the periodic palette lands on black.
        let renderer = Renderer::new(800, 800).unwrap();
        let buffer = renderer
            .render(&whole_set_view(), &EscapeTime::default(), &Grayscale)
            .unwrap();
        assert_eq!(buffer.pixel(400, 400), [0, 0, 0]);
    }

    #[test]
    fn a_zero_deadline_reports_timeout_with_nothing_finished() {
        let renderer = Renderer::new(64, 64)
            .unwrap()
            .with_threads(2)
            .with_deadline(Duration::from_secs(0));
        match renderer.render(&whole_set_view(), &EscapeTime::default(), &Grayscale) {
            Err(RenderError::Timeout { unfinished, .. }) => assert!(unfinished > 0),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[test]
    fn unit_panics_are_aggregated_not_fatal() {
        let renderer = Renderer::new(32, 32).unwrap().with_threads(2);
        match renderer.render(&whole_set_view(), &EscapeTime::default(), &Explosive) {
            Err(RenderError::WorkerPanic { units }) => {
                assert!(!units.is_empty());
                assert!(units.windows(2).all(|w| w[0] < w[1]));
            }
            other => panic!("expected aggregated worker failures, got {:?}", other),
        }
    }

    #[test]
    fn render_frame_composes_the_default_engine() {
        let buffer = render_frame(&whole_set_view(), 64, 64, 256).unwrap();
        assert_eq!(buffer.width(), 64);
        assert_eq!(buffer.height(), 64);
        assert!(render_frame(&whole_set_view(), 0, 64, 256).is_err());
        assert!(render_frame(&whole_set_view(), 64, 64, 0).is_err());
    }
}
