//! Runtime diagnostics over the interior cells of a grid.
//!
//! Computes conservation totals and solution bounds:
//! - Water volume and momentum
//! - Kinetic and potential energy
//! - Depth bounds, maximum speed and Froude number
//!
//! # Example
//!
//! ```
//! use swe_rs::solver::{GridDiagnostics, GridState};
//!
//! let mut state = GridState::new(4, 4, 10.0, 10.0).unwrap();
//! state.h_mut().fill(2.0);
//! let diag = GridDiagnostics::compute(&state, 9.81, 0.1);
//! assert!((diag.total_volume - 2.0 * 16.0 * 100.0).abs() < 1e-9);
//! ```

use super::state::GridState;

/// Diagnostic quantities for one grid state.
#[derive(Clone, Debug, PartialEq)]
pub struct GridDiagnostics {
    /// Water volume (Σ h · dx · dy)
    pub total_volume: f64,
    /// Total x-momentum (Σ hu · dx · dy)
    pub momentum_x: f64,
    /// Total y-momentum (Σ hv · dx · dy)
    pub momentum_y: f64,
    /// Kinetic energy (Σ ½ h (u² + v²) · dx · dy), wet cells only
    pub kinetic_energy: f64,
    /// Potential energy (Σ ½ g h² · dx · dy)
    pub potential_energy: f64,
    /// Minimum water depth
    pub min_depth: f64,
    /// Maximum water depth
    pub max_depth: f64,
    /// Maximum velocity magnitude in wet cells
    pub max_velocity: f64,
    /// Maximum Froude number |u| / sqrt(g h) in wet cells
    pub max_froude: f64,
    /// Number of cells at or above the wet threshold
    pub wet_cells: usize,
}

impl GridDiagnostics {
    /// Compute all diagnostics. Cells shallower than `h_wet` count as dry.
    pub fn compute(state: &GridState, g: f64, h_wet: f64) -> Self {
        let area = state.geometry().cell_area();

        let mut total_volume = 0.0;
        let mut momentum_x = 0.0;
        let mut momentum_y = 0.0;
        let mut kinetic_energy = 0.0;
        let mut potential_energy = 0.0;
        let mut min_depth = f64::MAX;
        let mut max_depth = f64::MIN;
        let mut max_velocity = 0.0_f64;
        let mut max_froude = 0.0_f64;
        let mut wet_cells = 0;

        for (x, y) in state.interior_indices() {
            let cell = state.cell(x, y);
            total_volume += cell.h * area;
            momentum_x += cell.hu * area;
            momentum_y += cell.hv * area;
            potential_energy += 0.5 * g * cell.h * cell.h * area;
            min_depth = min_depth.min(cell.h);
            max_depth = max_depth.max(cell.h);

            if cell.h >= h_wet {
                wet_cells += 1;
                let (u, v) = cell.velocity(0.0);
                let speed_sq = u * u + v * v;
                let speed = speed_sq.sqrt();
                kinetic_energy += 0.5 * cell.h * speed_sq * area;
                max_velocity = max_velocity.max(speed);
                max_froude = max_froude.max(speed / (g * cell.h).sqrt());
            }
        }

        Self {
            total_volume,
            momentum_x,
            momentum_y,
            kinetic_energy,
            potential_energy,
            min_depth,
            max_depth,
            max_velocity,
            max_froude,
            wet_cells,
        }
    }

    /// Kinetic plus potential energy.
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }

    /// Relative volume change against a reference state.
    pub fn volume_drift(&self, reference: &GridDiagnostics) -> f64 {
        if reference.total_volume.abs() > 0.0 {
            (self.total_volume - reference.total_volume) / reference.total_volume
        } else {
            self.total_volume
        }
    }

    /// Whether every total is finite.
    pub fn is_finite(&self) -> bool {
        self.total_volume.is_finite()
            && self.momentum_x.is_finite()
            && self.momentum_y.is_finite()
            && self.kinetic_energy.is_finite()
    }
}
