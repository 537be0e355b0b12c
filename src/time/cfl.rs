//! CFL timestep control.
//!
//! The maximum stable timestep of one sweep follows from the largest wave
//! speed it produced:
//!
//! ```text
//! dt = C · Δ / s_max
//! ```
//!
//! with `C = CFL_NUMBER = 0.4`, below the stability bound of 0.5 for the
//! first-order wave-propagation update. A sweep without waves (dry or
//! motionless domain) imposes no constraint and returns `f64::MAX`; the
//! driver caps that at the next checkpoint time.

/// Safety factor applied to `Δ / s_max`.
pub const CFL_NUMBER: f64 = 0.4;

/// Wave speeds at or below this count as "no waves".
pub const ZERO_TOLERANCE: f64 = 1e-5;

/// Courant number above which the update is unstable.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Maximum timestep for `max_wave_speed` on a grid with cell size `spacing`.
///
/// Returns `f64::MAX` when the speed is at or below [`ZERO_TOLERANCE`].
#[inline]
pub fn compute_max_timestep(max_wave_speed: f64, spacing: f64) -> f64 {
    TimestepController::default().max_timestep(max_wave_speed, spacing)
}

/// Courant number `dt · s / Δ`.
#[inline]
pub fn courant_number(dt: f64, wave_speed: f64, spacing: f64) -> f64 {
    dt * wave_speed / spacing
}

/// CFL constants for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestepController {
    /// Safety factor C
    pub cfl_number: f64,
    /// Speeds at or below this impose no constraint
    pub zero_tolerance: f64,
}

impl TimestepController {
    pub fn new(cfl_number: f64) -> Self {
        Self {
            cfl_number,
            ..Self::default()
        }
    }

    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// `C · spacing / max_wave_speed`, or `f64::MAX` without waves.
    pub fn max_timestep(&self, max_wave_speed: f64, spacing: f64) -> f64 {
        if max_wave_speed > self.zero_tolerance {
            self.cfl_number * spacing / max_wave_speed
        } else {
            f64::MAX
        }
    }

    /// Whether `dt` keeps the Courant number at or below [`STABILITY_LIMIT`].
    pub fn is_stable(&self, dt: f64, wave_speed: f64, spacing: f64) -> bool {
        courant_number(dt, wave_speed, spacing) <= STABILITY_LIMIT
    }
}

impl Default for TimestepController {
    fn default() -> Self {
        Self {
            cfl_number: CFL_NUMBER,
            zero_tolerance: ZERO_TOLERANCE,
        }
    }
}
