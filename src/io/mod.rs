//! Output and checkpoint I/O.
//!
//! This module provides:
//! - **Snapshots**: interior copies of the grid state for checkpoints
//! - **Writer/reader contracts**: [`OutputWriter`] and [`CheckpointReader`]
//! - **In-memory checkpoints**: [`MemoryWriter`], also usable to resume runs
//! - **VTK output**: XML `RectilinearGrid` series for ParaView
//! - **Coarse output**: block averaging of interior fields
//!
//! Writers are called by the driver between steps only, never while a sweep
//! or update is running.
//!
//! # Example
//!
//! ```no_run
//! use swe_rs::io::{OutputWriter, VtkWriter};
//! use swe_rs::solver::GridState;
//!
//! let state = GridState::new(100, 100, 10.0, 10.0).unwrap();
//! let mut writer = VtkWriter::new("out/dam_break").with_coarse(4);
//! writer.write_time_step(&state, 0.0).unwrap();
//! ```

mod coarse;
mod memory;
mod snapshot;
mod vtk;

pub use coarse::coarsen;
pub use memory::MemoryWriter;
pub use snapshot::Snapshot;
pub use vtk::{VtkWriter, write_vtk_grid};

use thiserror::Error;

use crate::grid::GridError;
use crate::solver::GridState;

/// Error type for output and checkpoint operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot does not fit the target grid.
    #[error("snapshot is {found:?} cells, grid is {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Snapshot fields could not be placed in a grid.
    #[error("invalid snapshot: {0}")]
    Grid(#[from] GridError),

    /// No checkpoint has been written yet.
    #[error("no checkpoint available")]
    NoCheckpoint,
}

/// Sink for checkpoint output.
pub trait OutputWriter: Send {
    /// Write the interior state at simulated time `time`.
    fn write_time_step(&mut self, state: &GridState, time: f64) -> Result<(), IoError>;

    /// Write a checkpoint reached after `iteration` steps.
    fn write_checkpoint(
        &mut self,
        state: &GridState,
        time: f64,
        _iteration: usize,
    ) -> Result<(), IoError> {
        self.write_time_step(state, time)
    }
}

impl<W: OutputWriter + ?Sized> OutputWriter for &mut W {
    fn write_time_step(&mut self, state: &GridState, time: f64) -> Result<(), IoError> {
        (**self).write_time_step(state, time)
    }

    fn write_checkpoint(
        &mut self,
        state: &GridState,
        time: f64,
        iteration: usize,
    ) -> Result<(), IoError> {
        (**self).write_checkpoint(state, time, iteration)
    }
}

/// Source of a checkpoint to resume from.
pub trait CheckpointReader {
    /// The most recent snapshot.
    fn read_latest(&self) -> Result<Snapshot, IoError>;
}
