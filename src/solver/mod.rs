//! Finite-volume solver core.
//!
//! # Submodules
//!
//! - [`state`]: Grid state with conserved fields and net-update buffers
//! - [`sweep`]: Per-interface Riemann solves in x and y
//! - [`update`]: Conservative cell update from the net-update buffers
//! - [`wetting_drying`]: Dry-cell clamp run after each update
//! - [`diagnostics`]: Volume, momentum and energy totals
//!
//! One dimensionally split step is
//!
//! ```text
//! sweep_horizontal -> apply_horizontal -> sweep_vertical -> apply_vertical
//! ```
//!
//! The driver in [`crate::simulation`] fills the ghost layer before each
//! sweep, so the y sweep reads ghosts consistent with the x update.

pub mod diagnostics;
pub mod state;
pub mod sweep;
pub mod update;
pub mod wetting_drying;

pub use diagnostics::GridDiagnostics;
pub use state::{CellState, GridState, HorizontalNetUpdates, Quantity, VerticalNetUpdates};
pub use sweep::{sweep_horizontal, sweep_vertical};
pub use update::{apply_both, apply_horizontal, apply_vertical};
pub use wetting_drying::{
    DRY_THRESHOLD, DryCellConfig, NEGATIVE_DEPTH_TOLERANCE, SevereCell, UpdateReport,
};
