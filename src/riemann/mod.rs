//! Net-update Riemann solvers for the 1D shallow water equations.
//!
//! Every sweep reduces the 2D problem to independent 1D Riemann problems at
//! cell interfaces. A solver turns the two neighbouring states into the net
//! updates of both cells and the fastest local wave speed.
//!
//! # Solver Trait
//!
//! The [`RiemannSolver`] trait is the seam between the grid machinery and
//! the numerics. Sweeps are generic over it, so the concrete solver is
//! resolved at compile time.
//!
//! ## Built-in Solvers
//! - [`FWaveSolver`]: f-wave with Roe speeds, dry cells reflect
//! - [`HlleSolver`]: f-wave with Einfeldt speeds, floods dry cells
//! - [`HybridSolver`]: f-wave in deep subsonic water, HLLE elsewhere
//! - [`StandardSolver`]: enum over the three for runtime selection

mod fwave;
mod hlle;
mod hybrid;
pub mod traits;
pub mod waves;

pub use fwave::FWaveSolver;
pub use hlle::HlleSolver;
pub use hybrid::{DEFAULT_SHALLOW_FACTOR, HybridSolver};
pub use traits::{
    BoxedSolver, InterfaceState, NetUpdates, RiemannSolver, SolverKind, SolverParams,
    StandardSolver, create_solver,
};
pub use waves::WaveSpeeds;
