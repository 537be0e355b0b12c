//! Simulation driver.
//!
//! Ties together the grid state, boundary conditions, a Riemann solver and
//! an output writer. One split step runs
//!
//! ```text
//! BoundaryFill → SweepX → TimestepFromX → UpdateX → BoundaryFill → SweepY → UpdateY
//! ```
//!
//! with the x timestep, taken on the finer of `dx` and `dy`, reused for the
//! y update. When the y waves are too fast for that step, the y update is
//! divided into substeps that each refill the ghosts and sweep again. Steps repeat until the next
//! checkpoint time, where the state is handed to the writer. The run ends
//! at the configured end time.
//!
//! # Example
//! ```
//! use swe_rs::io::MemoryWriter;
//! use swe_rs::riemann::HybridSolver;
//! use swe_rs::scenario::RadialDamBreak;
//! use swe_rs::simulation::{SimulationConfig, SimulationDriver};
//!
//! let mut driver = SimulationDriver::from_scenario(
//!     &RadialDamBreak::default(),
//!     40,
//!     40,
//!     HybridSolver::default(),
//! )
//! .unwrap()
//! .with_config(SimulationConfig::default().with_end_time(2.0).with_checkpoints(2));
//!
//! let mut writer = MemoryWriter::new();
//! let result = driver.run(&mut writer).unwrap();
//! assert_eq!(result.checkpoints_written, 3);
//! ```

mod config;
mod runner;

pub use config::{SimulationConfig, SimulationResult, SplittingMode, SweepAxes};
pub use runner::{SimulationDriver, StepReport};

use thiserror::Error;

use crate::boundary::BoundaryError;
use crate::grid::GridError;
use crate::io::IoError;

/// Error type for simulation runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Io(#[from] IoError),

    /// NaN or infinite values appeared in the state.
    #[error("non-finite state at t = {time}")]
    NonFiniteState { time: f64 },

    #[error("time step ({dt:.2e}) below minimum ({min:.2e})")]
    TimestepTooSmall { dt: f64, min: f64 },

    #[error("maximum step limit ({0}) reached")]
    MaxStepsExceeded(usize),

    #[cfg(feature = "parallel")]
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
