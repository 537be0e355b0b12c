//! f-wave solver with Roe eigenvalues.
//!
//! The cheapest of the built-in solvers and the most accurate for smooth,
//! deep, subsonic flow. It has no entropy fix and cannot flood dry cells:
//! a dry neighbour always acts as a reflecting wall.

use super::waves::{WetDryCase, decompose, reflect_at_dry, roe_speeds};
use super::{InterfaceState, NetUpdates, RiemannSolver, SolverParams};

/// f-wave Riemann solver.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FWaveSolver {
    params: SolverParams,
}

impl FWaveSolver {
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }
}

impl RiemannSolver for FWaveSolver {
    #[inline]
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates {
        let p = &self.params;
        match WetDryCase::classify(&left, &right, p.dry_tolerance) {
            WetDryCase::BothWet => decompose(&left, &right, roe_speeds(&left, &right, p), p),
            WetDryCase::BothDry => NetUpdates::ZERO,
            WetDryCase::LeftDry => reflect_at_dry(&right, false, p, roe_speeds),
            WetDryCase::RightDry => reflect_at_dry(&left, true, p, roe_speeds),
        }
    }

    fn name(&self) -> &'static str {
        "fwave"
    }

    fn params(&self) -> &SolverParams {
        &self.params
    }
}
