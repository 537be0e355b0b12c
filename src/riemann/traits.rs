//! Trait-based Riemann solver abstraction.
//!
//! A solver takes the two cell states sharing an interface and returns the
//! net updates each cell receives, plus the fastest wave speed at that
//! interface. Solvers hold only their parameters and keep no state between
//! calls, so one instance is shared by every worker thread of a sweep.
//!
//! # Example
//! ```
//! use swe_rs::riemann::{FWaveSolver, HlleSolver, InterfaceState, RiemannSolver};
//!
//! let left = InterfaceState::new(2.0, 0.0, 0.0);
//! let right = InterfaceState::new(1.0, 0.0, 0.0);
//!
//! // Using concrete type
//! let fwave = FWaveSolver::default();
//! let updates = fwave.compute_net_updates(left, right);
//! assert!(updates.max_wave_speed > 0.0);
//!
//! // Using trait object
//! let solver: &dyn RiemannSolver = &HlleSolver::default();
//! let updates = solver.compute_net_updates(left, right);
//! assert!((updates.h_left + updates.h_right).abs() < 1e-12);
//! ```

use super::{FWaveSolver, HlleSolver, HybridSolver};

// =============================================================================
// Interface States and Results
// =============================================================================

/// One side of an interface as seen by a 1D Riemann problem.
///
/// `hu` is the momentum normal to the interface: `hu` for an x sweep,
/// `hv` for a y sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterfaceState {
    /// Water height
    pub h: f64,
    /// Normal momentum
    pub hu: f64,
    /// Bathymetry
    pub b: f64,
}

impl InterfaceState {
    #[inline]
    pub fn new(h: f64, hu: f64, b: f64) -> Self {
        Self { h, hu, b }
    }

    /// Normal velocity, zero in cells at or below `dry_tolerance`.
    #[inline]
    pub fn velocity(&self, dry_tolerance: f64) -> f64 {
        if self.h > dry_tolerance {
            self.hu / self.h
        } else {
            0.0
        }
    }

    /// Free-surface elevation `h + b`.
    #[inline]
    pub fn surface(&self) -> f64 {
        self.h + self.b
    }

    #[inline]
    pub fn is_dry(&self, dry_tolerance: f64) -> bool {
        self.h < dry_tolerance
    }

    /// Mirror image behind a reflecting wall: same height and bed,
    /// opposite normal momentum.
    #[inline]
    pub fn reflected(&self) -> Self {
        Self {
            h: self.h,
            hu: -self.hu,
            b: self.b,
        }
    }
}

/// Net updates produced for one interface.
///
/// The left cell is updated with `h_left`/`hu_left` and the right cell with
/// `h_right`/`hu_right`. In the f-wave convention `h_left + h_right` equals
/// the mass-flux difference across the interface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetUpdates {
    pub h_left: f64,
    pub h_right: f64,
    pub hu_left: f64,
    pub hu_right: f64,
    /// Largest absolute wave speed at this interface
    pub max_wave_speed: f64,
}

impl NetUpdates {
    /// No waves at all.
    pub const ZERO: NetUpdates = NetUpdates {
        h_left: 0.0,
        h_right: 0.0,
        hu_left: 0.0,
        hu_right: 0.0,
        max_wave_speed: 0.0,
    };

    /// Swap the roles of the two sides and flip the momentum sign.
    ///
    /// Solving the mirrored problem `(R', L')` and mirroring the result gives
    /// the updates of `(L, R)`.
    #[inline]
    pub fn mirrored(&self) -> Self {
        Self {
            h_left: self.h_right,
            h_right: self.h_left,
            hu_left: -self.hu_right,
            hu_right: -self.hu_left,
            max_wave_speed: self.max_wave_speed,
        }
    }
}

// =============================================================================
// Solver Parameters
// =============================================================================

/// Physical and numerical constants shared by the built-in solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParams {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Cells with less water than this are treated as dry
    pub dry_tolerance: f64,
    /// Wave speeds below this magnitude are split evenly between both cells
    pub zero_tolerance: f64,
}

impl SolverParams {
    pub fn new(gravity: f64) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    pub fn with_dry_tolerance(mut self, dry_tolerance: f64) -> Self {
        self.dry_tolerance = dry_tolerance;
        self
    }

    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            dry_tolerance: 0.01,
            zero_tolerance: 1e-7,
        }
    }
}

// =============================================================================
// Riemann Solver Trait
// =============================================================================

/// Net-update Riemann solver for the 1D shallow water equations with
/// bathymetry.
///
/// # Implementation Notes
///
/// - Must be a pure function of the two states: sweeps call it from many
///   threads at once in arbitrary order
/// - Constant states must produce zero updates (lake at rest, including a
///   flat free surface over varying bathymetry)
/// - Should not allocate
pub trait RiemannSolver: Send + Sync {
    /// Net updates for the interface between `left` and `right`.
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Parameters in use.
    fn params(&self) -> &SolverParams;

    /// Whether water can flow onto a dry cell.
    ///
    /// Solvers without inundation treat dry neighbours as reflecting walls.
    fn supports_inundation(&self) -> bool {
        false
    }

    /// Scalar form of [`compute_net_updates`](Self::compute_net_updates).
    #[inline]
    fn net_updates(
        &self,
        h_left: f64,
        h_right: f64,
        hu_left: f64,
        hu_right: f64,
        b_left: f64,
        b_right: f64,
    ) -> NetUpdates {
        self.compute_net_updates(
            InterfaceState::new(h_left, hu_left, b_left),
            InterfaceState::new(h_right, hu_right, b_right),
        )
    }
}

impl<S: RiemannSolver + ?Sized> RiemannSolver for Box<S> {
    #[inline]
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates {
        (**self).compute_net_updates(left, right)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn params(&self) -> &SolverParams {
        (**self).params()
    }

    fn supports_inundation(&self) -> bool {
        (**self).supports_inundation()
    }
}

// =============================================================================
// Standard Solver Enum (Zero-Cost Dispatch)
// =============================================================================

/// Selector for the built-in solvers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// f-wave with Roe speeds, dry cells reflect
    FWave,
    /// f-wave with Einfeldt speeds and inundation
    Hlle,
    /// f-wave in deep subsonic flow, HLLE elsewhere
    #[default]
    Hybrid,
}

impl SolverKind {
    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::FWave => "fwave",
            SolverKind::Hlle => "hlle",
            SolverKind::Hybrid => "hybrid",
        }
    }
}

impl std::str::FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fwave" | "f-wave" => Ok(SolverKind::FWave),
            "hlle" => Ok(SolverKind::Hlle),
            "hybrid" => Ok(SolverKind::Hybrid),
            other => Err(format!("unknown Riemann solver '{other}'")),
        }
    }
}

/// Enum wrapper over the built-in solvers.
///
/// Runtime selection without a virtual call per interface: the match is
/// trivially predicted inside a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StandardSolver {
    FWave(FWaveSolver),
    Hlle(HlleSolver),
    Hybrid(HybridSolver),
}

impl StandardSolver {
    pub fn new(kind: SolverKind, params: SolverParams) -> Self {
        match kind {
            SolverKind::FWave => StandardSolver::FWave(FWaveSolver::new(params)),
            SolverKind::Hlle => StandardSolver::Hlle(HlleSolver::new(params)),
            SolverKind::Hybrid => StandardSolver::Hybrid(HybridSolver::new(params)),
        }
    }

    pub fn kind(&self) -> SolverKind {
        match self {
            StandardSolver::FWave(_) => SolverKind::FWave,
            StandardSolver::Hlle(_) => SolverKind::Hlle,
            StandardSolver::Hybrid(_) => SolverKind::Hybrid,
        }
    }
}

impl Default for StandardSolver {
    fn default() -> Self {
        Self::new(SolverKind::default(), SolverParams::default())
    }
}

impl From<SolverKind> for StandardSolver {
    fn from(kind: SolverKind) -> Self {
        Self::new(kind, SolverParams::default())
    }
}

impl RiemannSolver for StandardSolver {
    #[inline]
    fn compute_net_updates(&self, left: InterfaceState, right: InterfaceState) -> NetUpdates {
        match self {
            StandardSolver::FWave(s) => s.compute_net_updates(left, right),
            StandardSolver::Hlle(s) => s.compute_net_updates(left, right),
            StandardSolver::Hybrid(s) => s.compute_net_updates(left, right),
        }
    }

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn params(&self) -> &SolverParams {
        match self {
            StandardSolver::FWave(s) => s.params(),
            StandardSolver::Hlle(s) => s.params(),
            StandardSolver::Hybrid(s) => s.params(),
        }
    }

    fn supports_inundation(&self) -> bool {
        !matches!(self, StandardSolver::FWave(_))
    }
}

// =============================================================================
// Boxed Solver (Runtime Polymorphism)
// =============================================================================

/// Boxed solver for configuration-driven selection.
pub type BoxedSolver = Box<dyn RiemannSolver>;

/// Create a boxed solver of the requested kind.
pub fn create_solver(kind: SolverKind, params: SolverParams) -> BoxedSolver {
    match kind {
        SolverKind::FWave => Box::new(FWaveSolver::new(params)),
        SolverKind::Hlle => Box::new(HlleSolver::new(params)),
        SolverKind::Hybrid => Box::new(HybridSolver::new(params)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn dam_break() -> (InterfaceState, InterfaceState) {
        (
            InterfaceState::new(3.0, 0.0, 0.0),
            InterfaceState::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_scalar_form_matches_struct_form() {
        let (l, r) = dam_break();
        let solver = FWaveSolver::default();
        let a = solver.compute_net_updates(l, r);
        let b = solver.net_updates(l.h, r.h, l.hu, r.hu, l.b, r.b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_standard_solver_enum() {
        let (l, r) = dam_break();
        let params = SolverParams::default();

        let direct = HlleSolver::new(params).compute_net_updates(l, r);
        let via_enum = StandardSolver::new(SolverKind::Hlle, params).compute_net_updates(l, r);

        assert!((direct.h_left - via_enum.h_left).abs() < TOL);
        assert!((direct.hu_right - via_enum.hu_right).abs() < TOL);
    }

    #[test]
    fn test_boxed_solver() {
        let (l, r) = dam_break();
        let boxed = create_solver(SolverKind::FWave, SolverParams::default());
        let direct = FWaveSolver::default().compute_net_updates(l, r);
        let result = boxed.compute_net_updates(l, r);
        assert!((result.h_right - direct.h_right).abs() < TOL);
        assert_eq!(boxed.name(), "fwave");
    }

    #[test]
    fn test_solver_names() {
        assert_eq!(FWaveSolver::default().name(), "fwave");
        assert_eq!(HlleSolver::default().name(), "hlle");
        assert_eq!(HybridSolver::default().name(), "hybrid");
        assert_eq!(StandardSolver::default().name(), "hybrid");
    }

    #[test]
    fn test_inundation_flags() {
        assert!(!FWaveSolver::default().supports_inundation());
        assert!(HlleSolver::default().supports_inundation());
        assert!(StandardSolver::from(SolverKind::Hybrid).supports_inundation());
        assert!(!StandardSolver::from(SolverKind::FWave).supports_inundation());
    }

    #[test]
    fn test_solver_kind_parsing() {
        assert_eq!("FWave".parse::<SolverKind>(), Ok(SolverKind::FWave));
        assert_eq!("hlle".parse::<SolverKind>(), Ok(SolverKind::Hlle));
        assert_eq!("hybrid".parse::<SolverKind>(), Ok(SolverKind::Hybrid));
        assert!("augrie".parse::<SolverKind>().is_err());
    }

    #[test]
    fn test_mirrored_updates() {
        let u = NetUpdates {
            h_left: 1.0,
            h_right: 2.0,
            hu_left: 3.0,
            hu_right: 4.0,
            max_wave_speed: 5.0,
        };
        let m = u.mirrored();
        assert_eq!(m.h_left, 2.0);
        assert_eq!(m.h_right, 1.0);
        assert_eq!(m.hu_left, -4.0);
        assert_eq!(m.hu_right, -3.0);
        assert_eq!(m.mirrored(), u);
    }

    #[test]
    fn test_default_params() {
        let p = SolverParams::default();
        assert_eq!(p.gravity, 9.81);
        assert_eq!(p.dry_tolerance, 0.01);
        assert_eq!(p.zero_tolerance, 1e-7);

        let p = SolverParams::new(10.0).with_dry_tolerance(1e-3);
        assert_eq!(p.gravity, 10.0);
        assert_eq!(p.dry_tolerance, 1e-3);
    }
}
