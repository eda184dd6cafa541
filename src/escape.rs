// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  For a point c on the complex plane,
//! iterate z ← z² + c and count how long the orbit stays inside the
//! escape radius.  Points that never leave within the cap are (as far
//! as we can tell at this depth) members of the Mandelbrot set.

use errors::ConfigError;
use num::Complex;

/// Default orbit length before a point is declared a member.
pub const DEFAULT_ITERATION_CAP: u32 = 256;

/// Square of the escape radius.  An orbit whose norm-squared reaches
/// this is guaranteed to diverge, so iteration stops there.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// The evaluator's tunables.  Once built it is immutable, copied
/// freely into worker threads, and deterministic: identical inputs
/// always yield identical counts.
#[derive(Copy, Clone, Debug)]
pub struct EscapeTime {
    iteration_cap: u32,
    escape_radius_squared: f64,
}

impl Default for EscapeTime {
    fn default() -> EscapeTime {
        EscapeTime {
            iteration_cap: DEFAULT_ITERATION_CAP,
            escape_radius_squared: ESCAPE_RADIUS_SQUARED,
        }
    }
}

impl EscapeTime {
    /// Build an evaluator with a custom iteration cap and the standard
    /// escape radius.  The cap must be at least one.
    pub fn new(iteration_cap: u32) -> Result<EscapeTime, ConfigError> {
        if iteration_cap == 0 {
            return Err(ConfigError::BadIterationCap);
        }
        Ok(EscapeTime {
            iteration_cap,
            escape_radius_squared: ESCAPE_RADIUS_SQUARED,
        })
    }

    /// The configured orbit cap.
    pub fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    /// Count the iterations until the orbit of `c` escapes, up to the
    /// cap.  The orbit is seeded at c itself, so a point already
    /// outside the escape radius returns zero and a point that never
    /// escapes returns the cap.
    pub fn iterations(&self, c: Complex<f64>) -> u32 {
        let mut z = c;
        let mut iter = 0;
        while iter < self.iteration_cap && z.norm_sqr() < self.escape_radius_squared {
            z = z * z + c;
            iter += 1;
        }
        iter
    }
}
