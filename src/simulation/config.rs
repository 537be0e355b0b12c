//! Run configuration and result.

use crate::solver::DryCellConfig;
use crate::time::{CFL_NUMBER, STABILITY_LIMIT};

use super::SimulationError;

// =============================================================================
// Step Scheduling
// =============================================================================

/// How the x and y sweeps are combined into one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplittingMode {
    /// x sweep and update, then y sweep and update on the updated state
    #[default]
    Split,
    /// Both sweeps on the same state, one combined update
    Unsplit,
}

/// Which directions a split step covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepAxes {
    #[default]
    Both,
    XOnly,
    YOnly,
}

impl SweepAxes {
    pub fn includes_x(self) -> bool {
        matches!(self, SweepAxes::Both | SweepAxes::XOnly)
    }

    pub fn includes_y(self) -> bool {
        matches!(self, SweepAxes::Both | SweepAxes::YOnly)
    }
}

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Sweep combination.
    pub splitting: SplittingMode,
    /// Directions swept in split mode.
    pub axes: SweepAxes,
    /// CFL number for time step calculation.
    pub cfl: f64,
    /// Number of equally spaced output checkpoints.
    pub checkpoints: usize,
    /// Simulated end time (defaults to the scenario's end time).
    pub end_time: Option<f64>,
    /// Dry-cell clamp thresholds.
    pub dry_cells: DryCellConfig,
    /// Worker threads (None = rayon default).
    pub threads: Option<usize>,
    /// Minimum time step (run fails if the CFL step drops below this).
    pub dt_min: Option<f64>,
    /// Maximum number of time steps.
    pub max_steps: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            splitting: SplittingMode::Split,
            axes: SweepAxes::Both,
            cfl: CFL_NUMBER,
            checkpoints: 20,
            end_time: None,
            dry_cells: DryCellConfig::default(),
            threads: None,
            dt_min: None,
            max_steps: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_splitting(mut self, splitting: SplittingMode) -> Self {
        self.splitting = splitting;
        self
    }

    pub fn with_axes(mut self, axes: SweepAxes) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }

    pub fn with_checkpoints(mut self, checkpoints: usize) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_dry_cells(mut self, dry_cells: DryCellConfig) -> Self {
        self.dry_cells = dry_cells;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Set the minimum time step (run fails if dt drops below).
    pub fn with_dt_min(mut self, dt_min: f64) -> Self {
        self.dt_min = Some(dt_min);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |msg: String| Err(SimulationError::InvalidConfig(msg));

        if self.checkpoints == 0 {
            return invalid("at least one checkpoint is required".into());
        }
        if let Some(t) = self.end_time
            && !(t.is_finite() && t > 0.0)
        {
            return invalid(format!("end time must be positive and finite, got {t}"));
        }
        if !(self.cfl.is_finite() && self.cfl > 0.0) {
            return invalid(format!("CFL number must be positive, got {}", self.cfl));
        }
        if self.cfl > STABILITY_LIMIT {
            log::warn!(
                "CFL number {} exceeds the stability limit {}",
                self.cfl,
                STABILITY_LIMIT
            );
        }
        if self.threads == Some(0) {
            return invalid("thread count must be at least 1".into());
        }
        if let Some(dt_min) = self.dt_min
            && !(dt_min.is_finite() && dt_min >= 0.0)
        {
            return invalid(format!("minimum time step must be non-negative, got {dt_min}"));
        }
        if self.splitting == SplittingMode::Unsplit && self.axes != SweepAxes::Both {
            return invalid("unsplit stepping always sweeps both axes".into());
        }
        Ok(())
    }
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Result of a simulation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationResult {
    /// Final simulation time reached.
    pub final_time: f64,
    /// Number of time steps taken in this run.
    pub n_steps: usize,
    /// Minimum time step used.
    pub dt_min: f64,
    /// Maximum time step used.
    pub dt_max: f64,
    /// Checkpoints handed to the writer.
    pub checkpoints_written: usize,
    /// Steps whose vertical Courant number exceeded the stability limit.
    pub vertical_cfl_violations: usize,
    /// Steps whose y update was divided into substeps.
    pub subcycled_steps: usize,
    /// Cells clamped from a depth below the negative tolerance.
    pub severe_negative_cells: usize,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

impl SimulationResult {
    pub(crate) fn starting_at(time: f64) -> Self {
        Self {
            final_time: time,
            dt_min: f64::INFINITY,
            ..Self::default()
        }
    }

    /// No stability diagnostics were raised.
    pub fn is_clean(&self) -> bool {
        self.vertical_cfl_violations == 0 && self.severe_negative_cells == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.cfl, 0.4);
        assert_eq!(config.checkpoints, 20);
        assert_eq!(config.splitting, SplittingMode::Split);
        assert!(config.end_time.is_none());
        assert!(config.dt_min.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::default()
            .with_splitting(SplittingMode::Unsplit)
            .with_end_time(5.0)
            .with_checkpoints(3)
            .with_threads(2)
            .with_max_steps(100);
        assert_eq!(config.end_time, Some(5.0));
        assert_eq!(config.threads, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            SimulationConfig::default().with_checkpoints(0),
            SimulationConfig::default().with_end_time(-1.0),
            SimulationConfig::default().with_end_time(f64::NAN),
            SimulationConfig::default().with_cfl(0.0),
            SimulationConfig::default().with_threads(0),
            SimulationConfig::default().with_dt_min(-1e-3),
            SimulationConfig::default()
                .with_splitting(SplittingMode::Unsplit)
                .with_axes(SweepAxes::XOnly),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(SimulationError::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_axes() {
        assert!(SweepAxes::Both.includes_x() && SweepAxes::Both.includes_y());
        assert!(!SweepAxes::XOnly.includes_y());
        assert!(!SweepAxes::YOnly.includes_x());
    }
}
