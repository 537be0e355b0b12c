//! Dry-cell treatment applied after every conservative update.
//!
//! Finite-precision Riemann solvers leave small negative depths at wet/dry
//! fronts and large spurious velocities in nearly dry cells. After each
//! update:
//!
//! - `h < 0`: the cell is emptied, `h = hu = hv = 0`
//! - `0 ≤ h < dry_threshold`: momentum is zeroed
//!
//! A depth below `-negative_tolerance` is more than rounding noise and
//! usually means the timestep violated the CFL condition. Such cells are
//! still clamped, but they are counted in the [`UpdateReport`] so the
//! caller can log them. Nothing here prints.

use std::ops::Range;

/// Depth below which a cell's momentum is zeroed.
pub const DRY_THRESHOLD: f64 = 0.1;

/// Negative depth beyond which a clamp is reported as severe.
pub const NEGATIVE_DEPTH_TOLERANCE: f64 = 0.1;

/// Thresholds for the post-update dry-cell clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DryCellConfig {
    /// Cells shallower than this lose their momentum
    pub dry_threshold: f64,
    /// Negative depths deeper than this are reported as severe
    pub negative_tolerance: f64,
}

impl DryCellConfig {
    pub fn new(dry_threshold: f64) -> Self {
        Self {
            dry_threshold,
            ..Self::default()
        }
    }

    pub fn with_negative_tolerance(mut self, tolerance: f64) -> Self {
        self.negative_tolerance = tolerance.abs();
        self
    }

    /// Check if a depth counts as dry.
    #[inline]
    pub fn is_dry(&self, h: f64) -> bool {
        h < self.dry_threshold
    }
}

impl Default for DryCellConfig {
    fn default() -> Self {
        Self {
            dry_threshold: DRY_THRESHOLD,
            negative_tolerance: NEGATIVE_DEPTH_TOLERANCE,
        }
    }
}

/// A cell whose depth fell below the negative tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SevereCell {
    pub x: usize,
    pub y: usize,
    /// Depth before clamping
    pub h: f64,
}

/// What the dry-cell clamp did during one update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateReport {
    /// Cells with negative depth that were emptied
    pub clamped_cells: usize,
    /// Shallow cells whose momentum was zeroed
    pub damped_cells: usize,
    /// Clamped cells beyond the negative tolerance
    pub severe_cells: usize,
    /// Cells holding NaN or infinite values after the update
    pub nonfinite_cells: usize,
    /// Deepest negative depth among the severe cells
    pub worst: Option<SevereCell>,
}

impl UpdateReport {
    /// Combine reports of disjoint cell sets.
    pub fn merge(self, other: Self) -> Self {
        let worst = match (self.worst, other.worst) {
            (Some(a), Some(b)) => Some(if b.h < a.h { b } else { a }),
            (a, b) => a.or(b),
        };
        Self {
            clamped_cells: self.clamped_cells + other.clamped_cells,
            damped_cells: self.damped_cells + other.damped_cells,
            severe_cells: self.severe_cells + other.severe_cells,
            nonfinite_cells: self.nonfinite_cells + other.nonfinite_cells,
            worst,
        }
    }

    /// No severe or non-finite cells.
    pub fn is_healthy(&self) -> bool {
        self.severe_cells == 0 && self.nonfinite_cells == 0
    }

    fn record_severe(&mut self, x: usize, y: usize, h: f64) {
        self.severe_cells += 1;
        if self.worst.is_none_or(|w| h < w.h) {
            self.worst = Some(SevereCell { x, y, h });
        }
    }
}

/// Clamp rows `rows` of cell column `x`.
pub(crate) fn clamp_column(
    x: usize,
    rows: Range<usize>,
    h: &mut [f64],
    hu: &mut [f64],
    hv: &mut [f64],
    config: &DryCellConfig,
) -> UpdateReport {
    let mut report = UpdateReport::default();
    for y in rows {
        let depth = h[y];
        if !(depth.is_finite() && hu[y].is_finite() && hv[y].is_finite()) {
            report.nonfinite_cells += 1;
            continue;
        }
        if depth < 0.0 {
            if depth < -config.negative_tolerance {
                report.record_severe(x, y, depth);
            }
            h[y] = 0.0;
            hu[y] = 0.0;
            hv[y] = 0.0;
            report.clamped_cells += 1;
        } else if config.is_dry(depth) {
            hu[y] = 0.0;
            hv[y] = 0.0;
            report.damped_cells += 1;
        }
    }
    report
}
