//! Wave speed estimates and the f-wave decomposition shared by all solvers.
//!
//! The flux difference across an interface, including the bathymetry
//! source term,
//!
//! ```text
//! Δf = [ huR - huL,
//!        huR·uR + ½g·hR² - (huL·uL + ½g·hL²) + ½g(hR + hL)(bR - bL) ]
//! ```
//!
//! is split into two f-waves along the eigenvectors `(1, s0)` and `(1, s1)`.
//! Waves moving left update the left cell, waves moving right update the
//! right cell. Since the waves sum to `Δf`, the scheme is conservative and a
//! lake at rest (`h + b` constant, no velocity) produces no waves at all.
//!
//! Reference: Bale, LeVeque, Mitran & Rossmanith (2002), "A wave propagation
//! method for conservation laws and balance laws with spatially varying flux
//! functions"

use super::{InterfaceState, NetUpdates, SolverParams};

/// Characteristic speeds of the two waves, `s0 ≤ s1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSpeeds {
    pub s0: f64,
    pub s1: f64,
}

impl WaveSpeeds {
    #[inline]
    pub fn max_abs(&self) -> f64 {
        self.s0.abs().max(self.s1.abs())
    }
}

/// Roe-averaged velocity and celerity `(u_roe, c_roe)`.
///
/// Returns zeros when both sides are dry.
#[inline]
pub fn roe_averages(left: &InterfaceState, right: &InterfaceState, params: &SolverParams) -> (f64, f64) {
    let sqrt_h_l = left.h.max(0.0).sqrt();
    let sqrt_h_r = right.h.max(0.0).sqrt();
    let denom = sqrt_h_l + sqrt_h_r;
    if denom <= 0.0 {
        return (0.0, 0.0);
    }

    let u_l = left.velocity(params.dry_tolerance);
    let u_r = right.velocity(params.dry_tolerance);
    let h_roe = 0.5 * (left.h + right.h);
    let u_roe = (u_l * sqrt_h_l + u_r * sqrt_h_r) / denom;
    let c_roe = (params.gravity * h_roe).sqrt();
    (u_roe, c_roe)
}

/// Roe eigenvalues `u_roe ∓ c_roe`.
#[inline]
pub fn roe_speeds(left: &InterfaceState, right: &InterfaceState, params: &SolverParams) -> WaveSpeeds {
    let (u_roe, c_roe) = roe_averages(left, right, params);
    WaveSpeeds {
        s0: u_roe - c_roe,
        s1: u_roe + c_roe,
    }
}

/// Einfeldt speed bounds.
///
/// Minimum/maximum of the one-sided characteristics and the Roe
/// eigenvalues. Across a dry bed the bound becomes the rarefaction front
/// speed `u ± 2c` of the wet side.
#[inline]
pub fn einfeldt_speeds(
    left: &InterfaceState,
    right: &InterfaceState,
    params: &SolverParams,
) -> WaveSpeeds {
    let g = params.gravity;
    let u_l = left.velocity(params.dry_tolerance);
    let u_r = right.velocity(params.dry_tolerance);
    let c_l = (g * left.h.max(0.0)).sqrt();
    let c_r = (g * right.h.max(0.0)).sqrt();
    let (u_roe, c_roe) = roe_averages(left, right, params);

    let s0 = if left.is_dry(params.dry_tolerance) {
        u_r - 2.0 * c_r
    } else {
        (u_l - c_l).min(u_roe - c_roe)
    };
    let s1 = if right.is_dry(params.dry_tolerance) {
        u_l + 2.0 * c_l
    } else {
        (u_r + c_r).max(u_roe + c_roe)
    };

    WaveSpeeds { s0, s1 }
}

/// Flux difference `Δf` across the interface, bathymetry term included.
#[inline]
pub fn flux_difference(
    left: &InterfaceState,
    right: &InterfaceState,
    params: &SolverParams,
) -> (f64, f64) {
    let g = params.gravity;
    let u_l = left.velocity(params.dry_tolerance);
    let u_r = right.velocity(params.dry_tolerance);

    let f_dif0 = right.hu - left.hu;
    let f_dif1 = right.hu * u_r + 0.5 * g * right.h * right.h
        - (left.hu * u_l + 0.5 * g * left.h * left.h)
        + 0.5 * g * (right.h + left.h) * (right.b - left.b);
    (f_dif0, f_dif1)
}

/// Split `Δf` into two f-waves travelling at `speeds` and assign them.
pub fn decompose(
    left: &InterfaceState,
    right: &InterfaceState,
    speeds: WaveSpeeds,
    params: &SolverParams,
) -> NetUpdates {
    let WaveSpeeds { s0, s1 } = speeds;
    let max_wave_speed = speeds.max_abs();

    let ds = s1 - s0;
    if ds.abs() <= params.zero_tolerance {
        return NetUpdates {
            max_wave_speed,
            ..NetUpdates::ZERO
        };
    }

    let (f_dif0, f_dif1) = flux_difference(left, right, params);
    let beta0 = (s1 * f_dif0 - f_dif1) / ds;
    let beta1 = (-s0 * f_dif0 + f_dif1) / ds;

    let mut updates = NetUpdates {
        max_wave_speed,
        ..NetUpdates::ZERO
    };
    for (beta, speed) in [(beta0, s0), (beta1, s1)] {
        let (dh, dhu) = (beta, beta * speed);
        if speed < -params.zero_tolerance {
            updates.h_left += dh;
            updates.hu_left += dhu;
        } else if speed > params.zero_tolerance {
            updates.h_right += dh;
            updates.hu_right += dhu;
        } else {
            updates.h_left += 0.5 * dh;
            updates.hu_left += 0.5 * dhu;
            updates.h_right += 0.5 * dh;
            updates.hu_right += 0.5 * dhu;
        }
    }
    updates
}

/// Wet/dry classification of an interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WetDryCase {
    BothWet,
    BothDry,
    LeftDry,
    RightDry,
}

impl WetDryCase {
    #[inline]
    pub fn classify(left: &InterfaceState, right: &InterfaceState, dry_tolerance: f64) -> Self {
        match (left.is_dry(dry_tolerance), right.is_dry(dry_tolerance)) {
            (false, false) => WetDryCase::BothWet,
            (true, true) => WetDryCase::BothDry,
            (true, false) => WetDryCase::LeftDry,
            (false, true) => WetDryCase::RightDry,
        }
    }
}

/// Updates for a wet cell facing a dry one that it cannot flood.
///
/// The dry side is replaced by the mirror image of the wet side, which
/// turns the interface into a reflecting wall; the dry cell receives
/// nothing.
pub fn reflect_at_dry(
    wet: &InterfaceState,
    wet_is_left: bool,
    params: &SolverParams,
    speeds: impl Fn(&InterfaceState, &InterfaceState, &SolverParams) -> WaveSpeeds,
) -> NetUpdates {
    let ghost = wet.reflected();
    let mut updates = if wet_is_left {
        decompose(wet, &ghost, speeds(wet, &ghost, params), params)
    } else {
        decompose(&ghost, wet, speeds(&ghost, wet, params), params)
    };
    if wet_is_left {
        updates.h_right = 0.0;
        updates.hu_right = 0.0;
    } else {
        updates.h_left = 0.0;
        updates.hu_left = 0.0;
    }
    updates
}
