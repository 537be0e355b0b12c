//! HLLE solver: f-wave decomposition with Einfeldt speed bounds.
//!
//! The Einfeldt bounds enclose every physical wave, which keeps the scheme
//! positive at wet/dry fronts and through transonic rarefactions. Water
//! floods a dry cell when the wet free surface lies above the dry cell's
//! bed; otherwise the dry cell reflects like a wall.
//!
//! Reference: Einfeldt (1988), "On Godunov-type methods for gas dynamics"

use super::waves::{WetDryCase, decompose, einfeldt_speeds, reflect_at_dry};
use super::{InterfaceState, NetUpdates, RiemannSolver, SolverParams};

/// HLLE Riemann solver with inundation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HlleSolver {
    params: SolverParams,
}

impl HlleSolver {
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }

    /// Wet cell next to a dry one: flood it, or reflect off its bed.
    fn wet_dry(&self, wet: &InterfaceState, dry: &InterfaceState, wet_is_left: bool) -> NetUpdates {
        let p = &self.params;
        if wet.surface() > dry.b {
            // The dry side enters with no momentum of its own
            let dry = InterfaceState::new(dry.h.max(0.0), 0.0, dry.b);
            if wet_is_left {
                decompose(wet, &dry, einfeldt_speeds(wet, &dry, p), p)
            } else {
                decompose(&dry, wet, einfeldt_speeds(&dry, wet, p), p)
            }
        } else {
            reflect_at_dry(wet, wet_is_left, p, einfeldt_speeds)
        }
    }
}

impl RiemannSolver for HlleSolver {
    #[inline]
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates {
        let p = &self.params;
        match WetDryCase::classify(&left, &right, p.dry_tolerance) {
            WetDryCase::BothWet => decompose(&left, &right, einfeldt_speeds(&left, &right, p), p),
            WetDryCase::BothDry => NetUpdates::ZERO,
            WetDryCase::LeftDry => self.wet_dry(&right, &left, false),
            WetDryCase::RightDry => self.wet_dry(&left, &right, true),
        }
    }

    fn name(&self) -> &'static str {
        "hlle"
    }

    fn params(&self) -> &SolverParams {
        &self.params
    }

    fn supports_inundation(&self) -> bool {
        true
    }
}
