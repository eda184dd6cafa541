#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interactive Mandelbrot renderer
//!
//! The Mandelbrot set lives on the complex plane: a point c belongs to
//! the set when the orbit z ← z² + c never escapes to infinity.  The
//! number of iterations an orbit takes to escape is what gets painted.
//!
//! This crate is the rendering engine for an interactive explorer.  A
//! `Viewport` maps screen pixels to plane coordinates; navigation
//! commands pan it or zoom it about an anchor pixel; the `Renderer`
//! recomputes every pixel of a frame in parallel across a fixed pool
//! of worker threads and hands back a row-major RGB buffer.  Window
//! creation, keyboard handling, and frame presentation belong to
//! whatever platform layer sits on top; the engine only ever sees
//! "apply this command" and "render this viewport."

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate num;
extern crate num_cpus;

pub mod buffer;
pub mod color;
pub mod commands;
pub mod errors;
pub mod escape;
pub mod render;
pub mod viewport;

pub use buffer::PixelBuffer;
pub use color::{ColorMap, Grayscale};
pub use commands::{apply_command, pan, zoom_at_anchor, Command};
pub use errors::{ConfigError, RenderError};
pub use escape::EscapeTime;
pub use render::{render_frame, Renderer};
pub use viewport::Viewport;
