//! Cartesian grid primitives.
//!
//! - [`Field2D`]: column-major 2D array indexed `[(x, y)]`
//! - [`GHOST`]: width of the ghost layer around every cell field
//! - [`GridGeometry`]: validated cell counts, spacings and origin

mod field;
mod geometry;

pub use field::{Field2D, GHOST};
pub use geometry::GridGeometry;

use thiserror::Error;

/// Error type for grid construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// At least one direction has no interior cells.
    #[error("grid needs at least one interior cell per direction, got {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },

    /// Cell size is zero, negative or not finite.
    #[error("cell size along {axis} must be positive and finite, got {value}")]
    InvalidSpacing { axis: char, value: f64 },

    /// Supplied data does not match the grid shape.
    #[error("field '{name}' has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}
