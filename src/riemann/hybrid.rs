//! Hybrid solver: f-wave where it is safe, HLLE everywhere else.
//!
//! Deep subsonic interfaces dominate a typical ocean run and are handled by
//! the cheaper f-wave solver. Shallow, dry or supercritical interfaces fall
//! back to HLLE, which floods dry cells and stays positive at fronts.

use super::{FWaveSolver, HlleSolver, InterfaceState, NetUpdates, RiemannSolver, SolverParams};

/// Default multiple of the dry tolerance below which HLLE takes over.
pub const DEFAULT_SHALLOW_FACTOR: f64 = 10.0;

/// Hybrid f-wave/HLLE Riemann solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HybridSolver {
    fwave: FWaveSolver,
    hlle: HlleSolver,
    params: SolverParams,
    shallow_depth: f64,
}

impl HybridSolver {
    pub fn new(params: SolverParams) -> Self {
        Self {
            fwave: FWaveSolver::new(params),
            hlle: HlleSolver::new(params),
            params,
            shallow_depth: DEFAULT_SHALLOW_FACTOR * params.dry_tolerance,
        }
    }

    /// Depth below which an interface counts as shallow.
    pub fn with_shallow_depth(mut self, depth: f64) -> Self {
        self.shallow_depth = depth.max(self.params.dry_tolerance);
        self
    }

    pub fn shallow_depth(&self) -> f64 {
        self.shallow_depth
    }

    #[inline]
    fn is_deep_subcritical(&self, q: &InterfaceState) -> bool {
        if q.h < self.shallow_depth {
            return false;
        }
        let u = q.velocity(self.params.dry_tolerance);
        u * u < self.params.gravity * q.h
    }

    /// Whether the f-wave solver handles this interface.
    #[inline]
    pub fn uses_fwave(&self, left: &InterfaceState, right: &InterfaceState) -> bool {
        self.is_deep_subcritical(left) && self.is_deep_subcritical(right)
    }
}

impl Default for HybridSolver {
    fn default() -> Self {
        Self::new(SolverParams::default())
    }
}

impl RiemannSolver for HybridSolver {
    #[inline]
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates {
        if self.uses_fwave(&left, &right) {
            self.fwave.compute_net_updates(left, right)
        } else {
            self.hlle.compute_net_updates(left, right)
        }
    }

    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn params(&self) -> &SolverParams {
        &self.params
    }

    fn supports_inundation(&self) -> bool {
        true
    }
}
