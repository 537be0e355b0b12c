//! Grid geometry: cell counts, cell sizes and physical placement.

use super::{GHOST, GridError};
use crate::types::Bounds2D;

/// Fixed geometry of a uniform Cartesian grid.
///
/// `nx × ny` interior cells of size `dx × dy`, whose lower-left corner sits
/// at `origin`. Construction validates every field, so any value of this
/// type describes a usable grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    origin: (f64, f64),
}

impl GridGeometry {
    /// Geometry with its lower-left corner at the coordinate origin.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 {
            return Err(GridError::InvalidDimensions { nx, ny });
        }
        if !(dx.is_finite() && dx > 0.0) {
            return Err(GridError::InvalidSpacing { axis: 'x', value: dx });
        }
        if !(dy.is_finite() && dy > 0.0) {
            return Err(GridError::InvalidSpacing { axis: 'y', value: dy });
        }
        Ok(Self {
            nx,
            ny,
            dx,
            dy,
            origin: (0.0, 0.0),
        })
    }

    /// Split `bounds` into `nx × ny` cells.
    pub fn from_bounds(bounds: Bounds2D, nx: usize, ny: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 {
            return Err(GridError::InvalidDimensions { nx, ny });
        }
        let (dx, dy) = bounds.spacing(nx, ny);
        Ok(Self::new(nx, ny, dx, dy)?.with_origin(bounds.x_min, bounds.y_min))
    }

    /// Move the lower-left corner of the interior to `(x0, y0)`.
    pub fn with_origin(mut self, x0: f64, y0: f64) -> Self {
        self.origin = (x0, y0);
        self
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Columns of a cell field including the ghost layer.
    #[inline]
    pub fn padded_cols(&self) -> usize {
        self.nx + 2 * GHOST
    }

    /// Rows of a cell field including the ghost layer.
    #[inline]
    pub fn padded_rows(&self) -> usize {
        self.ny + 2 * GHOST
    }

    /// Number of interior cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Physical rectangle covered by the interior cells.
    pub fn bounds(&self) -> Bounds2D {
        let (x0, y0) = self.origin;
        Bounds2D::new(
            x0,
            x0 + self.nx as f64 * self.dx,
            y0,
            y0 + self.ny as f64 * self.dy,
        )
    }

    /// Centre of cell `(x, y)` in padded indices. Ghost cells lie half a
    /// cell outside the domain.
    #[inline]
    pub fn cell_center(&self, x: usize, y: usize) -> (f64, f64) {
        let (x0, y0) = self.origin;
        (
            x0 + (x as f64 - GHOST as f64 + 0.5) * self.dx,
            y0 + (y as f64 - GHOST as f64 + 0.5) * self.dy,
        )
    }
}
