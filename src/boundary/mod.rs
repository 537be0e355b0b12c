//! Boundary conditions: filling the ghost layer before each sweep.
//!
//! Every edge of the grid carries one [`BoundaryType`]. Before a sweep,
//! [`BoundaryConditions::apply`] writes the ghost column (left/right) or
//! ghost row (bottom/top) from the interior cells next to it.
//!
//! # Available Boundary Types
//!
//! | Type | Ghost state |
//! |------|-------------|
//! | `Wall` | Mirrored `h` and `b`, normal momentum negated |
//! | `Outflow` | Copy of the adjacent interior cell |
//! | `Connect` | Copy of the interior cell at the opposite edge (periodic) |
//! | `Passive` | Untouched, owned by an external exchanger |
//!
//! A wall ghost cell has the same surface as its neighbour and the opposite
//! normal velocity, so the Riemann solve at the boundary interface carries
//! no mass flux.
//!
//! Corner ghost cells are copied from the diagonal interior cell unless both
//! adjoining edges are passive. The sweeps never read corners.
//!
//! # Example
//!
//! ```
//! use swe_rs::boundary::{BoundaryConditions, BoundaryType};
//! use swe_rs::solver::GridState;
//!
//! let mut state = GridState::new(8, 8, 1.0, 1.0).unwrap();
//! state.h_mut().fill(1.0);
//!
//! let bc = BoundaryConditions::uniform(BoundaryType::Wall)
//!     .with_left(BoundaryType::Outflow)
//!     .with_right(BoundaryType::Outflow);
//! bc.validate().unwrap();
//! bc.apply(&mut state);
//! ```

mod ghost;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::BoundaryEdge;

pub use ghost::BoundaryConditions;

/// Ghost-cell policy of one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    /// Reflecting solid wall
    #[default]
    Wall,
    /// Zero-gradient open boundary
    Outflow,
    /// Periodic link to the opposite edge
    Connect,
    /// Ghost cells written by someone else
    Passive,
}

impl BoundaryType {
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryType::Wall => "wall",
            BoundaryType::Outflow => "outflow",
            BoundaryType::Connect => "connect",
            BoundaryType::Passive => "passive",
        }
    }
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryType {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wall" | "reflecting" => Ok(BoundaryType::Wall),
            "outflow" | "open" => Ok(BoundaryType::Outflow),
            "connect" | "periodic" => Ok(BoundaryType::Connect),
            "passive" => Ok(BoundaryType::Passive),
            _ => Err(BoundaryError::UnknownType(s.to_string())),
        }
    }
}

/// Errors in a boundary configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("connect boundary on the {edge} edge needs a connect boundary on the {} edge", edge.opposite())]
    UnpairedConnect { edge: BoundaryEdge },

    #[error("unknown boundary type: {0}")]
    UnknownType(String),
}
