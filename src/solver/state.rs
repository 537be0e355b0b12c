//! Grid state: conserved fields, bathymetry and net-update buffers.
//!
//! Cell fields are `(nx + 2) × (ny + 2)` with a ghost layer of width
//! [`GHOST`]. The net-update buffers hold one entry per interface:
//!
//! - x sweep: interface between cells `(x-1, y)` and `(x, y)`,
//!   `x ∈ 1..=nx+1`, `y ∈ 1..=ny`, stored at `[x-1][y-1]` in
//!   `(nx + 1) × ny` buffers
//! - y sweep: interface between cells `(x, y-1)` and `(x, y)`,
//!   `x ∈ 1..=nx`, `y ∈ 1..=ny+1`, stored at `[x-1][y-1]` in
//!   `nx × (ny + 1)` buffers
//!
//! Every buffer is allocated once here and overwritten by each sweep.

use std::ops::Range;

use crate::grid::{Field2D, GHOST, GridError, GridGeometry};

/// Full state of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellState {
    /// Water height
    pub h: f64,
    /// Momentum in x
    pub hu: f64,
    /// Momentum in y
    pub hv: f64,
    /// Bathymetry
    pub b: f64,
}

impl CellState {
    pub fn new(h: f64, hu: f64, hv: f64, b: f64) -> Self {
        Self { h, hu, hv, b }
    }

    /// Free-surface elevation `h + b`.
    #[inline]
    pub fn surface(&self) -> f64 {
        self.h + self.b
    }

    /// Velocity `(u, v)`, zero at or below `h_min`.
    #[inline]
    pub fn velocity(&self, h_min: f64) -> (f64, f64) {
        if self.h > h_min {
            (self.hu / self.h, self.hv / self.h)
        } else {
            (0.0, 0.0)
        }
    }
}

/// Selects one of the four cell fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    H,
    Hu,
    Hv,
    B,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [Quantity::H, Quantity::Hu, Quantity::Hv, Quantity::B];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::H => "h",
            Quantity::Hu => "hu",
            Quantity::Hv => "hv",
            Quantity::B => "b",
        }
    }
}

/// Net updates of the x sweep, `(nx + 1) × ny`.
#[derive(Clone, Debug, PartialEq)]
pub struct HorizontalNetUpdates {
    pub(crate) h_left: Field2D,
    pub(crate) h_right: Field2D,
    pub(crate) hu_left: Field2D,
    pub(crate) hu_right: Field2D,
}

impl HorizontalNetUpdates {
    fn new(nx: usize, ny: usize) -> Self {
        Self {
            h_left: Field2D::zeros(nx + 1, ny),
            h_right: Field2D::zeros(nx + 1, ny),
            hu_left: Field2D::zeros(nx + 1, ny),
            hu_right: Field2D::zeros(nx + 1, ny),
        }
    }

    pub fn h_left(&self) -> &Field2D {
        &self.h_left
    }

    pub fn h_right(&self) -> &Field2D {
        &self.h_right
    }

    pub fn hu_left(&self) -> &Field2D {
        &self.hu_left
    }

    pub fn hu_right(&self) -> &Field2D {
        &self.hu_right
    }
}

/// Net updates of the y sweep, `nx × (ny + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalNetUpdates {
    pub(crate) h_below: Field2D,
    pub(crate) h_above: Field2D,
    pub(crate) hv_below: Field2D,
    pub(crate) hv_above: Field2D,
}

impl VerticalNetUpdates {
    fn new(nx: usize, ny: usize) -> Self {
        Self {
            h_below: Field2D::zeros(nx, ny + 1),
            h_above: Field2D::zeros(nx, ny + 1),
            hv_below: Field2D::zeros(nx, ny + 1),
            hv_above: Field2D::zeros(nx, ny + 1),
        }
    }

    pub fn h_below(&self) -> &Field2D {
        &self.h_below
    }

    pub fn h_above(&self) -> &Field2D {
        &self.h_above
    }

    pub fn hv_below(&self) -> &Field2D {
        &self.hv_below
    }

    pub fn hv_above(&self) -> &Field2D {
        &self.hv_above
    }
}

/// Conserved fields and bathymetry of a Cartesian grid, plus the
/// net-update buffers the sweeps write into.
///
/// Grid dimensions are fixed at construction. Initial conditions are set
/// through the accessors, [`crate::scenario::initialize`] or a checkpoint.
#[derive(Clone, Debug)]
pub struct GridState {
    geometry: GridGeometry,
    pub(crate) h: Field2D,
    pub(crate) hu: Field2D,
    pub(crate) hv: Field2D,
    pub(crate) b: Field2D,
    pub(crate) horizontal: HorizontalNetUpdates,
    pub(crate) vertical: VerticalNetUpdates,
}

impl GridState {
    /// Zero-initialised grid of `nx × ny` cells of size `dx × dy`.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Result<Self, GridError> {
        Ok(Self::with_geometry(GridGeometry::new(nx, ny, dx, dy)?))
    }

    pub fn with_geometry(geometry: GridGeometry) -> Self {
        let (cols, rows) = (geometry.padded_cols(), geometry.padded_rows());
        let (nx, ny) = (geometry.nx(), geometry.ny());
        Self {
            geometry,
            h: Field2D::zeros(cols, rows),
            hu: Field2D::zeros(cols, rows),
            hv: Field2D::zeros(cols, rows),
            b: Field2D::zeros(cols, rows),
            horizontal: HorizontalNetUpdates::new(nx, ny),
            vertical: VerticalNetUpdates::new(nx, ny),
        }
    }

    /// Grid whose interior cells are taken from `nx × ny` fields.
    ///
    /// Ghost cells start at zero and are filled by the next boundary pass.
    pub fn from_interior(
        geometry: GridGeometry,
        h: &Field2D,
        hu: &Field2D,
        hv: &Field2D,
        b: &Field2D,
    ) -> Result<Self, GridError> {
        let mut state = Self::with_geometry(geometry);
        for (quantity, source) in Quantity::ALL.into_iter().zip([h, hu, hv, b]) {
            state.set_interior(quantity, source)?;
        }
        Ok(state)
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.geometry.nx()
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.geometry.ny()
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.geometry.dx()
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.geometry.dy()
    }

    /// Padded x indices of interior cells.
    #[inline]
    pub fn interior_cols(&self) -> Range<usize> {
        GHOST..GHOST + self.nx()
    }

    /// Padded y indices of interior cells.
    #[inline]
    pub fn interior_rows(&self) -> Range<usize> {
        GHOST..GHOST + self.ny()
    }

    /// All interior `(x, y)` pairs in column order.
    pub fn interior_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.interior_cols()
            .flat_map(move |x| self.interior_rows().map(move |y| (x, y)))
    }

    pub fn h(&self) -> &Field2D {
        &self.h
    }

    pub fn hu(&self) -> &Field2D {
        &self.hu
    }

    pub fn hv(&self) -> &Field2D {
        &self.hv
    }

    pub fn b(&self) -> &Field2D {
        &self.b
    }

    pub fn h_mut(&mut self) -> &mut Field2D {
        &mut self.h
    }

    pub fn hu_mut(&mut self) -> &mut Field2D {
        &mut self.hu
    }

    pub fn hv_mut(&mut self) -> &mut Field2D {
        &mut self.hv
    }

    pub fn b_mut(&mut self) -> &mut Field2D {
        &mut self.b
    }

    pub fn field(&self, quantity: Quantity) -> &Field2D {
        match quantity {
            Quantity::H => &self.h,
            Quantity::Hu => &self.hu,
            Quantity::Hv => &self.hv,
            Quantity::B => &self.b,
        }
    }

    pub fn field_mut(&mut self, quantity: Quantity) -> &mut Field2D {
        match quantity {
            Quantity::H => &mut self.h,
            Quantity::Hu => &mut self.hu,
            Quantity::Hv => &mut self.hv,
            Quantity::B => &mut self.b,
        }
    }

    /// Copy of the interior `nx × ny` block of one field.
    pub fn interior(&self, quantity: Quantity) -> Field2D {
        self.field(quantity).window(GHOST, GHOST, self.nx(), self.ny())
    }

    /// Overwrite the interior block of one field.
    pub fn set_interior(&mut self, quantity: Quantity, values: &Field2D) -> Result<(), GridError> {
        let expected = (self.nx(), self.ny());
        if values.shape() != expected {
            return Err(GridError::ShapeMismatch {
                name: quantity.name(),
                expected,
                found: values.shape(),
            });
        }
        let rows = self.interior_rows();
        let field = self.field_mut(quantity);
        for (i, column) in values.columns().enumerate() {
            field.column_mut(i + GHOST)[rows.clone()].copy_from_slice(column);
        }
        Ok(())
    }

    /// State of cell `(x, y)` in padded indices.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> CellState {
        CellState {
            h: self.h[(x, y)],
            hu: self.hu[(x, y)],
            hv: self.hv[(x, y)],
            b: self.b[(x, y)],
        }
    }

    #[inline]
    pub fn set_cell(&mut self, x: usize, y: usize, cell: CellState) {
        self.h[(x, y)] = cell.h;
        self.hu[(x, y)] = cell.hu;
        self.hv[(x, y)] = cell.hv;
        self.b[(x, y)] = cell.b;
    }

    /// Buffers written by the last x sweep.
    pub fn horizontal_updates(&self) -> &HorizontalNetUpdates {
        &self.horizontal
    }

    /// Buffers written by the last y sweep.
    pub fn vertical_updates(&self) -> &VerticalNetUpdates {
        &self.vertical
    }

    /// Sum of `h` over interior cells.
    pub fn interior_water_sum(&self) -> f64 {
        self.h.window_sum(GHOST, GHOST, self.nx(), self.ny())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_and_buffer_shapes() {
        let state = GridState::new(5, 3, 1.0, 2.0).unwrap();
        assert_eq!(state.h().shape(), (7, 5));
        assert_eq!(state.b().shape(), (7, 5));

        let hz = state.horizontal_updates();
        assert_eq!(hz.h_left().shape(), (6, 3));
        assert_eq!(hz.hu_right().shape(), (6, 3));

        let vt = state.vertical_updates();
        assert_eq!(vt.h_below().shape(), (5, 4));
        assert_eq!(vt.hv_above().shape(), (5, 4));
    }

    #[test]
    fn test_rejects_malformed_grid() {
        assert!(GridState::new(0, 3, 1.0, 1.0).is_err());
        assert!(GridState::new(3, 3, -1.0, 1.0).is_err());
        assert!(GridState::new(3, 3, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_interior_indices_cover_interior_once() {
        let state = GridState::new(4, 3, 1.0, 1.0).unwrap();
        let cells: Vec<_> = state.interior_indices().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells.first(), Some(&(1, 1)));
        assert_eq!(cells.last(), Some(&(4, 3)));
        assert!(cells.iter().all(|&(x, y)| (1..=4).contains(&x) && (1..=3).contains(&y)));
    }

    #[test]
    fn test_set_and_read_interior() {
        let mut state = GridState::new(3, 2, 1.0, 1.0).unwrap();
        let values = Field2D::from_fn(3, 2, |x, y| (x * 10 + y) as f64);
        state.set_interior(Quantity::Hu, &values).unwrap();

        assert_eq!(state.hu()[(1, 1)], 0.0);
        assert_eq!(state.hu()[(3, 2)], 21.0);
        assert_eq!(state.hu()[(0, 0)], 0.0);
        assert_eq!(state.interior(Quantity::Hu), values);
    }

    #[test]
    fn test_set_interior_shape_mismatch() {
        let mut state = GridState::new(3, 2, 1.0, 1.0).unwrap();
        let err = state
            .set_interior(Quantity::H, &Field2D::zeros(2, 3))
            .unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                name: "h",
                expected: (3, 2),
                found: (2, 3),
            }
        );
    }

    #[test]
    fn test_cell_roundtrip_and_water_sum() {
        let mut state = GridState::new(2, 2, 1.0, 1.0).unwrap();
        state.set_cell(1, 2, CellState::new(3.0, 1.5, -0.5, -2.0));
        state.set_cell(0, 0, CellState::new(100.0, 0.0, 0.0, 0.0)); // ghost

        let cell = state.cell(1, 2);
        assert_eq!(cell.surface(), 1.0);
        assert_eq!(cell.velocity(1e-6), (0.5, -0.5 / 3.0));
        assert_eq!(state.interior_water_sum(), 3.0);
    }
}
