//! Interior snapshots of a grid state.

use crate::grid::{Field2D, GridGeometry};
use crate::solver::{GridState, Quantity};

use super::IoError;

/// Interior cells of `h`, `hu`, `hv` and `b` at one point in time.
///
/// Ghost cells are not stored; the boundary pass refills them after a
/// restore.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub nx: usize,
    pub ny: usize,
    pub h: Field2D,
    pub hu: Field2D,
    pub hv: Field2D,
    pub b: Field2D,
    /// Simulated time
    pub time: f64,
    /// Steps taken to reach `time`
    pub iteration: usize,
}

impl Snapshot {
    /// Copy the interior of `state`.
    pub fn capture(state: &GridState, time: f64, iteration: usize) -> Self {
        Self {
            nx: state.nx(),
            ny: state.ny(),
            h: state.interior(Quantity::H),
            hu: state.interior(Quantity::Hu),
            hv: state.interior(Quantity::Hv),
            b: state.interior(Quantity::B),
            time,
            iteration,
        }
    }

    /// Rebuild a grid state on `geometry`.
    pub fn restore(&self, geometry: GridGeometry) -> Result<GridState, IoError> {
        let expected = (geometry.nx(), geometry.ny());
        if expected != (self.nx, self.ny) {
            return Err(IoError::ShapeMismatch {
                expected,
                found: (self.nx, self.ny),
            });
        }
        Ok(GridState::from_interior(
            geometry, &self.h, &self.hu, &self.hv, &self.b,
        )?)
    }

    /// Sum of `h` over the stored cells.
    pub fn water_sum(&self) -> f64 {
        self.h.as_slice().iter().sum()
    }
}

impl GridState {
    /// Interior snapshot at `time` after `iteration` steps.
    pub fn snapshot(&self, time: f64, iteration: usize) -> Snapshot {
        Snapshot::capture(self, time, iteration)
    }

    /// Grid state restored from a checkpoint.
    pub fn from_snapshot(geometry: GridGeometry, snapshot: &Snapshot) -> Result<Self, IoError> {
        snapshot.restore(geometry)
    }
}
