//! Integration tests for mass conservation and symmetry.
//!
//! These tests verify:
//! - Σh invariant with periodic boundaries on all edges
//! - Σh invariant in a closed basin
//! - Mirror symmetry of a centred bump in a walled square
//! - Lake at rest over varying bathymetry

use std::f64::consts::PI;

use swe_rs::boundary::{BoundaryConditions, BoundaryType};
use swe_rs::riemann::{RiemannSolver, SolverKind, SolverParams, StandardSolver};
use swe_rs::scenario::{self, Scenario};
use swe_rs::simulation::{SimulationConfig, SimulationDriver, SplittingMode};
use swe_rs::solver::{CellState, GridState};

const G: f64 = 9.81;
const REL_TOL: f64 = 1e-11;

/// Smooth periodic waves over a periodic bed, moving diagonally.
fn periodic_state(nx: usize, ny: usize) -> GridState {
    let mut state = GridState::new(nx, ny, 1.0, 1.0).unwrap();
    let (lx, ly) = (nx as f64, ny as f64);
    for (x, y) in state.interior_indices().collect::<Vec<_>>() {
        let (cx, cy) = state.geometry().cell_center(x, y);
        let h = 10.0 + (2.0 * PI * cx / lx).sin() * (2.0 * PI * cy / ly).cos();
        let b = -10.0 + 0.5 * (2.0 * PI * cy / ly).sin();
        state.set_cell(x, y, CellState::new(h, 0.5 * h, -0.3 * h, b));
    }
    state
}

fn relative_drift(before: f64, after: f64) -> f64 {
    ((after - before) / before).abs()
}

fn all_solvers() -> [StandardSolver; 3] {
    let params = SolverParams::new(G);
    [SolverKind::FWave, SolverKind::Hlle, SolverKind::Hybrid].map(|k| StandardSolver::new(k, params))
}

#[test]
fn test_periodic_conservation_split() {
    for solver in all_solvers() {
        let state = periodic_state(32, 24);
        let before = state.interior_water_sum();
        let mut driver =
            SimulationDriver::new(state, BoundaryConditions::periodic(), solver).unwrap();

        for _ in 0..40 {
            let report = driver.step(f64::MAX).unwrap();
            assert_eq!(report.update.clamped_cells, 0);
        }

        let after = driver.state().interior_water_sum();
        assert!(
            relative_drift(before, after) < REL_TOL,
            "{}: Σh drifted from {before} to {after}",
            solver.name()
        );
    }
}

#[test]
fn test_periodic_conservation_unsplit() {
    for solver in all_solvers() {
        let state = periodic_state(20, 20);
        let before = state.interior_water_sum();
        let mut driver = SimulationDriver::new(state, BoundaryConditions::periodic(), solver)
            .unwrap()
            .with_config(SimulationConfig::default().with_splitting(SplittingMode::Unsplit));

        for _ in 0..40 {
            driver.step(f64::MAX).unwrap();
        }

        let after = driver.state().interior_water_sum();
        assert!(
            relative_drift(before, after) < REL_TOL,
            "{}: Σh drifted from {before} to {after}",
            solver.name()
        );
    }
}

#[test]
fn test_closed_basin_conservation() {
    // Tilted pool sloshing against walls
    let scenario = swe_rs::scenario::SplashingPool;
    let mut driver =
        SimulationDriver::from_scenario(&scenario, 40, 40, swe_rs::riemann::HybridSolver::default())
            .unwrap();
    let before = driver.state().interior_water_sum();

    for _ in 0..50 {
        driver.step(f64::MAX).unwrap();
    }

    let after = driver.state().interior_water_sum();
    assert!(relative_drift(before, after) < REL_TOL);
    // The pool is actually moving
    assert!(driver.state().hu().max_abs() > 1.0);
}

/// Gaussian hump at the centre of the unit square.
struct CentredBump;

impl Scenario for CentredBump {
    fn bathymetry(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        let r2 = (x - 0.5).powi(2) + (y - 0.5).powi(2);
        1.0 + (-r2 / 0.02).exp()
    }
}

#[test]
fn test_wall_mirror_symmetry() {
    const SYM_TOL: f64 = 1e-9;
    let n = 24;

    for solver in all_solvers() {
        let name = solver.name();
        let mut driver = SimulationDriver::from_scenario(&CentredBump, n, n, solver).unwrap();
        for _ in 0..30 {
            driver.step(f64::MAX).unwrap();
        }

        let state = driver.state();
        let mirror = n + 1;
        for (x, y) in state.interior_indices() {
            let h = state.h()[(x, y)];
            let h_mx = state.h()[(mirror - x, y)];
            let h_my = state.h()[(x, mirror - y)];
            assert!((h - h_mx).abs() < SYM_TOL, "{name}: x mirror broken at ({x}, {y})");
            assert!((h - h_my).abs() < SYM_TOL, "{name}: y mirror broken at ({x}, {y})");

            // Normal momenta flip sign under reflection
            let hu = state.hu()[(x, y)];
            let hv = state.hv()[(x, y)];
            assert!((hu + state.hu()[(mirror - x, y)]).abs() < SYM_TOL);
            assert!((hv + state.hv()[(x, mirror - y)]).abs() < SYM_TOL);
        }
    }
}

/// Still water over a Gaussian seamount.
struct LakeAtRest;

impl Scenario for LakeAtRest {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        let r2 = (x - 0.5).powi(2) + (y - 0.5).powi(2);
        -5.0 + 2.0 * (-r2 / 0.05).exp()
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        -self.bathymetry(x, y)
    }
}

#[test]
fn test_lake_at_rest() {
    const TOL: f64 = 1e-10;
    let (initial, _) = scenario::build(&LakeAtRest, 30, 30).unwrap();

    for solver in all_solvers() {
        let name = solver.name();
        let mut driver = SimulationDriver::from_scenario(&LakeAtRest, 30, 30, solver).unwrap();
        for _ in 0..20 {
            driver.step(0.01).unwrap();
        }

        let state = driver.state();
        for (x, y) in state.interior_indices() {
            let surface = state.cell(x, y).surface();
            assert!(surface.abs() < TOL, "{name}: surface moved at ({x}, {y}): {surface}");
            assert!((state.h()[(x, y)] - initial.h()[(x, y)]).abs() < TOL);
        }
        assert!(state.hu().max_abs() < TOL, "{name}");
        assert!(state.hv().max_abs() < TOL, "{name}");
    }
}

#[test]
fn test_outflow_loses_mass() {
    // Dam break with open edges drains once the wave reaches them
    let mut state = GridState::new(10, 10, 1.0, 1.0).unwrap();
    for (x, y) in state.interior_indices().collect::<Vec<_>>() {
        let h = if x <= 5 { 2.0 } else { 1.0 };
        state.set_cell(x, y, CellState::new(h, 0.0, 0.0, 0.0));
    }
    let before = state.interior_water_sum();
    let bc = BoundaryConditions::uniform(BoundaryType::Wall).with_right(BoundaryType::Outflow);
    let mut driver = SimulationDriver::new(
        state,
        bc,
        StandardSolver::new(SolverKind::Hlle, SolverParams::new(G)),
    )
    .unwrap();

    for _ in 0..60 {
        driver.step(f64::MAX).unwrap();
    }
    assert!(driver.state().interior_water_sum() < before);
}
