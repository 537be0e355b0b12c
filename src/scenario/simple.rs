//! Reference scenarios with closed-form initial conditions.

use std::f64::consts::PI;

use crate::boundary::BoundaryType;
use crate::types::{BoundaryEdge, Bounds2D};

use super::Scenario;

/// Default run time of the kilometre-scale scenarios (seconds).
const SIMULATION_TIME: f64 = 80.0;

fn square_domain(edge: BoundaryEdge, size: f64) -> f64 {
    Bounds2D::new(0.0, size, 0.0, size).edge(edge)
}

fn distance(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    ((x - cx) * (x - cx) + (y - cy) * (y - cy)).sqrt()
}

/// Column of 25 m water with radius 100 m in a 10 m deep basin.
///
/// Domain `[0, 1000]²`, outflow on every edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct RadialDamBreak {
    /// Adds a 10 m pit and a 20 m block to the bed
    pub obstacles: bool,
}

impl RadialDamBreak {
    pub fn with_obstacles() -> Self {
        Self { obstacles: true }
    }
}

impl Scenario for RadialDamBreak {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        if !self.obstacles {
            return 0.0;
        }
        let pit = if x > 300.0 && x < 500.0 && y > 200.0 && y < 400.0 { -10.0 } else { 0.0 };
        let block = if x > 400.0 && x < 700.0 && y > 600.0 && y < 800.0 { 20.0 } else { 0.0 };
        pit + block
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        if distance(x, y, 500.0, 500.0) < 100.0 { 25.0 } else { 10.0 }
    }

    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        BoundaryType::Outflow
    }

    fn boundary_position(&self, edge: BoundaryEdge) -> f64 {
        square_domain(edge, 1000.0)
    }

    fn end_simulation_time(&self) -> f64 {
        SIMULATION_TIME
    }

    fn name(&self) -> &'static str {
        "radial dam break"
    }
}

/// Flat 260 m water column over a 5 m bump of radius 50 m.
///
/// The surface starts raised above the bump and collapses outwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct BathymetryDamBreak;

impl Scenario for BathymetryDamBreak {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        if distance(x, y, 500.0, 500.0) < 50.0 { -255.0 } else { -260.0 }
    }

    fn water_height(&self, _x: f64, _y: f64) -> f64 {
        260.0
    }

    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        BoundaryType::Outflow
    }

    fn boundary_position(&self, edge: BoundaryEdge) -> f64 {
        square_domain(edge, 1000.0)
    }

    fn end_simulation_time(&self) -> f64 {
        SIMULATION_TIME
    }

    fn name(&self) -> &'static str {
        "bathymetry dam break"
    }
}

/// Lake at rest over a small bump: the surface is flat at 10 m.
///
/// A well-balanced solver keeps this state unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeaAtRest;

impl SeaAtRest {
    fn on_bump(x: f64, y: f64) -> bool {
        distance(x, y, 0.5, 0.5) < 0.1
    }
}

impl Scenario for SeaAtRest {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        if Self::on_bump(x, y) { 0.1 } else { 0.0 }
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        if Self::on_bump(x, y) { 9.9 } else { 10.0 }
    }

    fn name(&self) -> &'static str {
        "sea at rest"
    }
}

/// Closed pool whose surface is tilted by 10 m along the diagonal.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplashingPool;

impl Scenario for SplashingPool {
    fn bathymetry(&self, _x: f64, _y: f64) -> f64 {
        -250.0
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        250.0 + (5.0 - (x + y) / 200.0)
    }

    fn boundary_position(&self, edge: BoundaryEdge) -> f64 {
        square_domain(edge, 1000.0)
    }

    fn end_simulation_time(&self) -> f64 {
        SIMULATION_TIME
    }

    fn name(&self) -> &'static str {
        "splashing pool"
    }
}

/// Water cone on a conical bed in the unit square.
///
/// The water runs dry towards the rim, exercising the wet/dry front.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplashingCone;

impl Scenario for SplashingCone {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        let r = distance(x, y, 0.5, 0.5);
        1.0 + 9.0 * r.min(0.5)
    }

    fn water_height(&self, x: f64, y: f64) -> f64 {
        let r = distance(x, y, 0.5, 0.5);
        let mut h = 4.0 - 4.5 * (r / 0.5);
        if r < 0.1 {
            h += 1.0;
        }
        h.max(0.0)
    }

    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        BoundaryType::Outflow
    }

    fn end_simulation_time(&self) -> f64 {
        0.5
    }

    fn name(&self) -> &'static str {
        "splashing cone"
    }
}

/// 100 m deep ocean with a 1 km × 1 km seafloor displacement at its centre.
///
/// Domain `[0, 10000]²`, walls on every edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArtificialTsunami;

impl ArtificialTsunami {
    /// Vertical seafloor displacement, at most 5 m.
    pub fn displacement(x: f64, y: f64) -> f64 {
        let (sx, sy) = ((x - 5000.0) / 500.0, (y - 5000.0) / 500.0);
        if sx.abs() <= 1.0 && sy.abs() <= 1.0 {
            5.0 * ((sx + 1.0) * PI).sin() * (1.0 - sy * sy)
        } else {
            0.0
        }
    }
}

impl Scenario for ArtificialTsunami {
    fn bathymetry(&self, x: f64, y: f64) -> f64 {
        -100.0 + Self::displacement(x, y)
    }

    fn water_height(&self, _x: f64, _y: f64) -> f64 {
        100.0
    }

    fn boundary_position(&self, edge: BoundaryEdge) -> f64 {
        square_domain(edge, 10000.0)
    }

    fn end_simulation_time(&self) -> f64 {
        SIMULATION_TIME
    }

    fn name(&self) -> &'static str {
        "artificial tsunami"
    }
}
