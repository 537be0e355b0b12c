//! Initial conditions.
//!
//! A [`Scenario`] describes the domain, the initial water column and the
//! boundary types. It is sampled once at every cell centre by
//! [`initialize`]; the solver never calls it again.
//!
//! # Example
//!
//! ```
//! use swe_rs::grid::GridGeometry;
//! use swe_rs::scenario::{self, RadialDamBreak, Scenario};
//! use swe_rs::solver::GridState;
//!
//! let dam_break = RadialDamBreak::default();
//! let geometry = GridGeometry::from_scenario(&dam_break, 50, 50).unwrap();
//! let mut state = GridState::with_geometry(geometry);
//! scenario::initialize(&mut state, &dam_break);
//!
//! assert_eq!(state.h()[(25, 25)], 25.0);
//! assert_eq!(dam_break.end_simulation_time(), 80.0);
//! ```

mod simple;

pub use simple::{
    ArtificialTsunami, BathymetryDamBreak, RadialDamBreak, SeaAtRest, SplashingCone,
    SplashingPool,
};

use crate::boundary::{BoundaryConditions, BoundaryType};
use crate::grid::{GridError, GridGeometry};
use crate::solver::{CellState, GridState};
use crate::types::{BoundaryEdge, Bounds2D, EdgeMap};

/// Initial condition and domain of a simulation.
///
/// Only bathymetry and water height are required. The domain defaults to
/// the unit square with walls on every edge.
pub trait Scenario {
    /// Bed elevation at `(x, y)`.
    fn bathymetry(&self, x: f64, y: f64) -> f64;

    /// Water depth at `(x, y)`.
    fn water_height(&self, x: f64, y: f64) -> f64;

    /// Initial x-velocity at `(x, y)`.
    fn velocity_u(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    /// Initial y-velocity at `(x, y)`.
    fn velocity_v(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        BoundaryType::Wall
    }

    /// Physical coordinate of an edge.
    fn boundary_position(&self, edge: BoundaryEdge) -> f64 {
        Bounds2D::unit_square().edge(edge)
    }

    /// Simulated time at which the run stops.
    fn end_simulation_time(&self) -> f64 {
        0.1
    }

    fn name(&self) -> &'static str {
        "scenario"
    }

    /// Domain rectangle from the four boundary positions.
    fn bounds(&self) -> Bounds2D {
        Bounds2D::from_edges(EdgeMap::from_fn(|edge| self.boundary_position(edge)))
    }

    /// Boundary conditions from the per-edge types.
    fn boundary_conditions(&self) -> BoundaryConditions {
        BoundaryConditions::from_edges(EdgeMap::from_fn(|edge| self.boundary_type(edge)))
    }
}

impl GridGeometry {
    /// Geometry covering the scenario's domain with `nx × ny` cells.
    ///
    /// `dx = (right - left) / nx`, `dy = (top - bottom) / ny`, origin at the
    /// lower-left corner.
    pub fn from_scenario<S: Scenario + ?Sized>(
        scenario: &S,
        nx: usize,
        ny: usize,
    ) -> Result<Self, GridError> {
        Self::from_bounds(scenario.bounds(), nx, ny)
    }
}

/// Sample `scenario` at the centre of every cell, ghost cells included.
///
/// Momentum is `h · u` and `h · v`. Ghost cells receive the value at their
/// (out-of-domain) centre and are overwritten by the first boundary pass
/// unless the edge is passive.
pub fn initialize<S: Scenario + ?Sized>(state: &mut GridState, scenario: &S) {
    let geometry = *state.geometry();
    for x in 0..geometry.padded_cols() {
        for y in 0..geometry.padded_rows() {
            let (cx, cy) = geometry.cell_center(x, y);
            let h = scenario.water_height(cx, cy);
            let cell = CellState::new(
                h,
                h * scenario.velocity_u(cx, cy),
                h * scenario.velocity_v(cx, cy),
                scenario.bathymetry(cx, cy),
            );
            state.set_cell(x, y, cell);
        }
    }
}

/// Geometry, initialised state and boundary conditions for a scenario.
pub fn build<S: Scenario + ?Sized>(
    scenario: &S,
    nx: usize,
    ny: usize,
) -> Result<(GridState, BoundaryConditions), GridError> {
    let geometry = GridGeometry::from_scenario(scenario, nx, ny)?;
    let mut state = GridState::with_geometry(geometry);
    initialize(&mut state, scenario);
    Ok((state, scenario.boundary_conditions()))
}
