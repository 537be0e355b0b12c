//! Rectangular domain extent.

use std::fmt;

use super::{BoundaryEdge, EdgeMap};

/// Axis-aligned rectangle covered by the grid's interior cells.
///
/// Bounds are not validated here; an inverted or empty rectangle is
/// rejected when a grid geometry is derived from it.
///
/// # Example
///
/// ```
/// use swe_rs::types::Bounds2D;
///
/// let bounds = Bounds2D::new(0.0, 1000.0, 0.0, 500.0);
/// assert_eq!(bounds.width(), 1000.0);
/// assert_eq!(bounds.spacing(100, 50), (10.0, 10.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Position of the left edge
    pub x_min: f64,
    /// Position of the right edge
    pub x_max: f64,
    /// Position of the bottom edge
    pub y_min: f64,
    /// Position of the top edge
    pub y_max: f64,
}

impl Bounds2D {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Build from the four edge positions.
    pub fn from_edges(edges: EdgeMap<f64>) -> Self {
        Self::new(edges.left, edges.right, edges.bottom, edges.top)
    }

    pub fn unit_square() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Position of one edge.
    #[inline]
    pub fn edge(&self, edge: BoundaryEdge) -> f64 {
        match edge {
            BoundaryEdge::Left => self.x_min,
            BoundaryEdge::Right => self.x_max,
            BoundaryEdge::Bottom => self.y_min,
            BoundaryEdge::Top => self.y_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Cell size `(dx, dy)` when the rectangle is split into `nx × ny` cells.
    #[inline]
    pub fn spacing(&self, nx: usize, ny: usize) -> (f64, f64) {
        (self.width() / nx as f64, self.height() / ny as f64)
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}] × [{:.2}, {:.2}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::unit_square()
    }
}
