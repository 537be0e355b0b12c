//! Time stepping: CFL timestep control and checkpoint scheduling.

mod cfl;
mod checkpoints;

pub use cfl::{
    CFL_NUMBER, STABILITY_LIMIT, TimestepController, ZERO_TOLERANCE, compute_max_timestep,
    courant_number,
};
pub use checkpoints::CheckpointSchedule;
