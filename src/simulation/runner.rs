//! Simulation driver implementation.
//!
//! Owns the grid for the whole run and sequences boundary fill, sweeps and
//! updates. Output happens only between steps.

use std::time::Instant;

use crate::boundary::BoundaryConditions;
use crate::grid::GridGeometry;
use crate::io::{CheckpointReader, OutputWriter};
use crate::riemann::RiemannSolver;
use crate::scenario::{self, Scenario};
use crate::solver::{
    GridDiagnostics, GridState, UpdateReport, apply_both, apply_horizontal, apply_vertical,
    sweep_horizontal, sweep_vertical,
};
use crate::time::{CheckpointSchedule, STABILITY_LIMIT, TimestepController, courant_number};

use super::config::{SimulationConfig, SimulationResult, SplittingMode, SweepAxes};
use super::SimulationError;

// =============================================================================
// Step Report
// =============================================================================

/// What one step did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Time step applied
    pub dt: f64,
    /// The CFL step exceeded the allowed maximum and was cut to it
    pub capped: bool,
    /// Largest wave speed of the x sweep (0 if not swept)
    pub max_speed_x: f64,
    /// Largest wave speed of the y sweep (0 if not swept)
    pub max_speed_y: f64,
    /// Largest Courant number of the y updates when they reuse the x time step
    pub vertical_courant: Option<f64>,
    /// Number of y updates the step was divided into (0 if not swept)
    pub vertical_substeps: usize,
    /// Dry-cell clamp results of all updates in the step
    pub update: UpdateReport,
}

impl StepReport {
    /// The y update ran above the stability limit.
    pub fn vertical_cfl_violated(&self) -> bool {
        self.vertical_courant.is_some_and(|c| c > STABILITY_LIMIT)
    }
}

// =============================================================================
// Simulation Driver
// =============================================================================

/// Time-stepping driver for one grid.
///
/// # Type Parameters
///
/// * `S` - Riemann solver (statically dispatched per interface)
pub struct SimulationDriver<S: RiemannSolver> {
    state: GridState,
    boundaries: BoundaryConditions,
    solver: S,
    config: SimulationConfig,
    time: f64,
    iteration: usize,
}

impl<S: RiemannSolver> SimulationDriver<S> {
    /// Driver starting at t = 0 from an initialised state.
    pub fn new(
        state: GridState,
        boundaries: BoundaryConditions,
        solver: S,
    ) -> Result<Self, SimulationError> {
        boundaries.validate()?;
        Ok(Self {
            state,
            boundaries,
            solver,
            config: SimulationConfig::default(),
            time: 0.0,
            iteration: 0,
        })
    }

    /// Driver for `scenario` on an `nx × ny` grid, ending at the scenario's
    /// end time.
    pub fn from_scenario<Sc: Scenario + ?Sized>(
        scenario: &Sc,
        nx: usize,
        ny: usize,
        solver: S,
    ) -> Result<Self, SimulationError> {
        let (state, boundaries) = scenario::build(scenario, nx, ny)?;
        let mut driver = Self::new(state, boundaries, solver)?;
        driver.config.end_time = Some(scenario.end_simulation_time());
        Ok(driver)
    }

    /// Driver continuing from the latest checkpoint of `reader`.
    pub fn resume<R: CheckpointReader + ?Sized>(
        reader: &R,
        geometry: GridGeometry,
        boundaries: BoundaryConditions,
        solver: S,
    ) -> Result<Self, SimulationError> {
        let snapshot = reader.read_latest()?;
        let state = GridState::from_snapshot(geometry, &snapshot)?;
        let mut driver = Self::new(state, boundaries, solver)?;
        driver.time = snapshot.time;
        driver.iteration = snapshot.iteration;
        log::info!(
            "Resuming at t = {:.4} after {} steps",
            snapshot.time,
            snapshot.iteration
        );
        Ok(driver)
    }

    /// Replace the configuration. An end time already taken from a
    /// scenario is kept unless `config` sets one.
    pub fn with_config(mut self, mut config: SimulationConfig) -> Self {
        if config.end_time.is_none() {
            config.end_time = self.config.end_time;
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }

    pub fn into_state(self) -> GridState {
        self.state
    }

    pub fn boundaries(&self) -> &BoundaryConditions {
        &self.boundaries
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken since t = 0, including steps before a resume.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Diagnostics of the current state.
    pub fn diagnostics(&self) -> GridDiagnostics {
        GridDiagnostics::compute(
            &self.state,
            self.solver.params().gravity,
            self.config.dry_cells.dry_threshold,
        )
    }

    fn controller(&self) -> TimestepController {
        TimestepController::new(self.config.cfl)
    }

    /// Cut `dt` to `max_dt` and reject it if it is below the minimum.
    fn limit_timestep(&self, dt: f64, max_dt: f64) -> Result<(f64, bool), SimulationError> {
        if let Some(min) = self.config.dt_min
            && dt < min
        {
            return Err(SimulationError::TimestepTooSmall { dt, min });
        }
        if dt >= max_dt {
            Ok((max_dt, true))
        } else {
            Ok((dt, false))
        }
    }

    /// Advance by one time step of at most `max_dt`.
    ///
    /// When the CFL step reaches `max_dt`, the step is exactly `max_dt` and
    /// the report is marked `capped`.
    pub fn step(&mut self, max_dt: f64) -> Result<StepReport, SimulationError> {
        let report = match self.config.splitting {
            SplittingMode::Split => self.split_step(max_dt)?,
            SplittingMode::Unsplit => self.unsplit_step(max_dt)?,
        };

        self.time += report.dt;
        self.iteration += 1;

        if report.update.nonfinite_cells > 0 {
            return Err(SimulationError::NonFiniteState { time: self.time });
        }
        if let Some(worst) = report.update.worst {
            log::warn!(
                "{} cells fell below -{} at t = {:.4}; deepest h = {:.3e} at ({}, {})",
                report.update.severe_cells,
                self.config.dry_cells.negative_tolerance,
                self.time,
                worst.h,
                worst.x,
                worst.y
            );
        }
        if let Some(courant) = report.vertical_courant
            && report.vertical_cfl_violated()
        {
            log::warn!(
                "vertical Courant number {:.3} exceeds {} at t = {:.4}",
                courant,
                STABILITY_LIMIT,
                self.time
            );
        }
        Ok(report)
    }

    fn split_step(&mut self, max_dt: f64) -> Result<StepReport, SimulationError> {
        let controller = self.controller();
        let (dx, dy) = (self.state.dx(), self.state.dy());
        let dry = self.config.dry_cells;
        let axes = self.config.axes;
        let mut report = StepReport::default();

        if axes.includes_x() {
            self.boundaries.apply(&mut self.state);
            report.max_speed_x = sweep_horizontal(&mut self.state, &self.solver);
            // The y update reuses this step, so it must fit the finer axis too
            let spacing = if axes.includes_y() { dx.min(dy) } else { dx };
            let dt_x = controller.max_timestep(report.max_speed_x, spacing);
            (report.dt, report.capped) = self.limit_timestep(dt_x, max_dt)?;
            report.update = apply_horizontal(&mut self.state, report.dt, &dry);
        }

        if axes.includes_y() {
            // Ghosts must see the x update
            self.boundaries.apply(&mut self.state);
            report.max_speed_y = sweep_vertical(&mut self.state, &self.solver);
            // Without x waves or a cap, the x step carries no time scale
            if axes == SweepAxes::YOnly || report.dt == f64::MAX {
                let dt_y = controller.max_timestep(report.max_speed_y, dy);
                (report.dt, report.capped) = self.limit_timestep(dt_y, max_dt)?;
                let vertical = apply_vertical(&mut self.state, report.dt, &dry);
                report.update = report.update.merge(vertical);
                report.vertical_substeps = 1;
            } else {
                self.subcycled_vertical(&controller, &mut report);
            }
        }

        Ok(report)
    }

    /// Apply the y update over the x time step, divided into equal substeps
    /// when the y waves are too fast for a single update.
    ///
    /// Expects the y sweep of the first substep to be in the buffers.
    fn subcycled_vertical(&mut self, controller: &TimestepController, report: &mut StepReport) {
        let dy = self.state.dy();
        let dry = self.config.dry_cells;

        let courant = courant_number(report.dt, report.max_speed_y, dy);
        let target = controller.cfl_number.min(STABILITY_LIMIT);
        let substeps = if courant > STABILITY_LIMIT {
            (courant / target).ceil() as usize
        } else {
            1
        };
        let sub_dt = report.dt / substeps as f64;
        let mut max_courant = courant_number(sub_dt, report.max_speed_y, dy);

        for substep in 0..substeps {
            if substep > 0 {
                self.boundaries.apply(&mut self.state);
                let speed = sweep_vertical(&mut self.state, &self.solver);
                report.max_speed_y = report.max_speed_y.max(speed);
                max_courant = max_courant.max(courant_number(sub_dt, speed, dy));
            }
            let vertical = apply_vertical(&mut self.state, sub_dt, &dry);
            report.update = report.update.merge(vertical);
        }

        if substeps > 1 {
            log::debug!(
                "y Courant number {:.3} at dt = {:.3e}, y update split into {} substeps",
                courant,
                report.dt,
                substeps
            );
        }
        report.vertical_courant = Some(max_courant);
        report.vertical_substeps = substeps;
    }

    fn unsplit_step(&mut self, max_dt: f64) -> Result<StepReport, SimulationError> {
        let controller = self.controller();
        let (dx, dy) = (self.state.dx(), self.state.dy());
        let mut report = StepReport::default();

        self.boundaries.apply(&mut self.state);
        report.max_speed_x = sweep_horizontal(&mut self.state, &self.solver);
        report.max_speed_y = sweep_vertical(&mut self.state, &self.solver);

        let dt = controller
            .max_timestep(report.max_speed_x, dx)
            .min(controller.max_timestep(report.max_speed_y, dy));
        (report.dt, report.capped) = self.limit_timestep(dt, max_dt)?;
        report.update = apply_both(&mut self.state, report.dt, &self.config.dry_cells);

        Ok(report)
    }

    /// Run to the end time, writing every checkpoint.
    pub fn run<W: OutputWriter + ?Sized>(
        &mut self,
        writer: &mut W,
    ) -> Result<SimulationResult, SimulationError> {
        self.run_with_callback(writer, |_, _, _| {})
    }

    /// Run to the end time, calling `callback(state, time, checkpoint)`
    /// after each checkpoint is written.
    pub fn run_with_callback<W, F>(
        &mut self,
        writer: &mut W,
        mut callback: F,
    ) -> Result<SimulationResult, SimulationError>
    where
        W: OutputWriter + ?Sized,
        F: FnMut(&GridState, f64, usize),
    {
        self.config.validate()?;
        let end_time = self.config.end_time.ok_or_else(|| {
            SimulationError::InvalidConfig("no end time configured".to_string())
        })?;
        let schedule = CheckpointSchedule::new(end_time, self.config.checkpoints);

        #[cfg(feature = "parallel")]
        let pool = {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(threads) = self.config.threads {
                builder = builder.num_threads(threads);
            }
            builder.build()?
        };

        let start_wall = Instant::now();
        let mut result = SimulationResult::starting_at(self.time);

        log::info!(
            "Starting simulation: {} solver, {}x{} cells, t = {:.4} -> {:.4}, {} checkpoints",
            self.solver.name(),
            self.state.nx(),
            self.state.ny(),
            self.time,
            end_time,
            schedule.count()
        );
        log::info!(
            "Domain {}, boundaries {}",
            self.state.geometry().bounds(),
            self.boundaries
        );

        // Initial state is checkpoint 0 unless resuming
        if self.iteration == 0 && self.time <= 0.0 {
            self.boundaries.apply(&mut self.state);
            writer.write_checkpoint(&self.state, self.time, self.iteration)?;
            result.checkpoints_written += 1;
            callback(&self.state, self.time, 0);
        }

        let mut next = schedule.next_after(self.time);
        while let Some(index) = next {
            let target = schedule.time_at(index);

            while self.time < target {
                if let Some(max_steps) = self.config.max_steps
                    && result.n_steps >= max_steps
                {
                    return Err(SimulationError::MaxStepsExceeded(max_steps));
                }

                let max_dt = target - self.time;
                #[cfg(feature = "parallel")]
                let report = pool.install(|| self.step(max_dt))?;
                #[cfg(not(feature = "parallel"))]
                let report = self.step(max_dt)?;

                // Land exactly on the checkpoint
                if report.capped || self.time > target {
                    self.time = target;
                }

                result.n_steps += 1;
                result.dt_min = result.dt_min.min(report.dt);
                result.dt_max = result.dt_max.max(report.dt);
                result.severe_negative_cells += report.update.severe_cells;
                if report.vertical_cfl_violated() {
                    result.vertical_cfl_violations += 1;
                }
                if report.vertical_substeps > 1 {
                    result.subcycled_steps += 1;
                }

                log::debug!(
                    "Step {}: t = {:.6}, dt = {:.3e}, s_x = {:.3}, s_y = {:.3}",
                    self.iteration,
                    self.time,
                    report.dt,
                    report.max_speed_x,
                    report.max_speed_y
                );
            }

            writer.write_checkpoint(&self.state, self.time, self.iteration)?;
            result.checkpoints_written += 1;
            log::info!(
                "Checkpoint {}/{} at t = {:.4} ({} steps)",
                index,
                schedule.count(),
                self.time,
                self.iteration
            );
            callback(&self.state, self.time, index);

            next = (index < schedule.count()).then_some(index + 1);
        }

        result.final_time = self.time;
        result.wall_time = start_wall.elapsed().as_secs_f64();

        log::info!(
            "Simulation complete: {} steps in {:.2}s, dt range [{:.2e}, {:.2e}]",
            result.n_steps,
            result.wall_time,
            result.dt_min,
            result.dt_max
        );
        if !result.is_clean() {
            log::warn!(
                "{} vertical CFL violations, {} severe negative depths",
                result.vertical_cfl_violations,
                result.severe_negative_cells
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryType;
    use crate::io::MemoryWriter;
    use crate::riemann::{FWaveSolver, HybridSolver};
    use crate::scenario::{RadialDamBreak, SeaAtRest};
    use crate::solver::CellState;

    const TOL: f64 = 1e-9;

    fn still_lake() -> SimulationDriver<FWaveSolver> {
        let mut state = GridState::new(8, 8, 1.0, 1.0).unwrap();
        state.h_mut().fill(1.0);
        SimulationDriver::new(
            state,
            BoundaryConditions::uniform(BoundaryType::Wall),
            FWaveSolver::default(),
        )
        .unwrap()
    }

    fn dam_break(nx: usize) -> SimulationDriver<HybridSolver> {
        SimulationDriver::from_scenario(&RadialDamBreak::default(), nx, nx, HybridSolver::default())
            .unwrap()
    }

    #[test]
    fn test_rejects_unpaired_connect() {
        let state = GridState::new(4, 4, 1.0, 1.0).unwrap();
        let bc = BoundaryConditions::uniform(BoundaryType::Wall).with_left(BoundaryType::Connect);
        let result = SimulationDriver::new(state, bc, FWaveSolver::default());
        assert!(matches!(result, Err(SimulationError::Boundary(_))));
    }

    #[test]
    fn test_step_respects_cfl() {
        let mut driver = dam_break(20);
        let report = driver.step(f64::MAX).unwrap();
        let dx = driver.state().dx();

        assert!(!report.capped);
        assert!(report.max_speed_x > 0.0);
        assert!(report.dt <= 0.5 * dx / report.max_speed_x);
        assert!((report.dt - 0.4 * dx / report.max_speed_x).abs() < TOL);
        assert_eq!(driver.iteration(), 1);
        assert!((driver.time() - report.dt).abs() < TOL);
    }

    #[test]
    fn test_step_capped_by_max_dt() {
        let mut driver = dam_break(10);
        let report = driver.step(1e-4).unwrap();
        assert!(report.capped);
        assert_eq!(report.dt, 1e-4);
    }

    #[test]
    fn test_still_lake_stays_still() {
        let mut driver = still_lake().with_config(SimulationConfig::default().with_end_time(1.0));
        let before = driver.state().interior_water_sum();
        for _ in 0..10 {
            driver.step(f64::MAX).unwrap();
        }
        assert!((driver.state().interior_water_sum() - before).abs() < TOL);
        assert!(driver.state().hu().max_abs() < TOL);
        assert!(driver.state().hv().max_abs() < TOL);
    }

    #[test]
    fn test_run_writes_all_checkpoints() {
        let config = SimulationConfig::default()
            .with_end_time(1.0)
            .with_checkpoints(4)
            .with_threads(2);
        let mut driver = dam_break(16).with_config(config);
        let mut writer = MemoryWriter::new();
        let mut seen = Vec::new();
        let result = driver
            .run_with_callback(&mut writer, |_, t, i| seen.push((i, t)))
            .unwrap();

        assert_eq!(result.checkpoints_written, 5);
        assert_eq!(writer.times(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[4], (4, 1.0));
        assert_eq!(result.final_time, 1.0);
        assert!(result.n_steps > 0);
        assert!(result.dt_min <= result.dt_max);
        assert_eq!(writer.latest().map(|s| s.iteration), Some(driver.iteration()));
    }

    #[test]
    fn test_simulation_max_steps() {
        let config = SimulationConfig::default()
            .with_end_time(100.0)
            .with_checkpoints(1)
            .with_max_steps(5);
        let mut driver = dam_break(10).with_config(config);
        let result = driver.run(&mut MemoryWriter::new());
        assert!(matches!(result, Err(SimulationError::MaxStepsExceeded(5))));
        assert_eq!(driver.iteration(), 5);
    }

    #[test]
    fn test_dt_min_violation() {
        let config = SimulationConfig::default().with_end_time(10.0).with_dt_min(1.0);
        let mut driver = dam_break(50).with_config(config);
        let result = driver.run(&mut MemoryWriter::new());
        assert!(matches!(result, Err(SimulationError::TimestepTooSmall { .. })));
    }

    #[test]
    fn test_missing_end_time() {
        let mut driver = still_lake();
        let result = driver.run(&mut MemoryWriter::new());
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_dry_domain_jumps_to_checkpoints() {
        let state = GridState::new(4, 4, 1.0, 1.0).unwrap();
        let mut driver =
            SimulationDriver::new(state, BoundaryConditions::default(), FWaveSolver::default())
                .unwrap()
                .with_config(SimulationConfig::default().with_end_time(2.0).with_checkpoints(2));
        let result = driver.run(&mut MemoryWriter::new()).unwrap();
        // One capped step per checkpoint
        assert_eq!(result.n_steps, 2);
        assert_eq!(result.dt_max, 1.0);
        assert_eq!(result.final_time, 2.0);
    }

    #[test]
    fn test_scenario_end_time_kept() {
        let driver = SimulationDriver::from_scenario(&SeaAtRest, 10, 10, FWaveSolver::default())
            .unwrap()
            .with_config(SimulationConfig::default().with_checkpoints(2));
        assert_eq!(driver.config().end_time, Some(0.1));
        assert_eq!(driver.config().checkpoints, 2);
    }

    #[test]
    fn test_resume_continues_from_checkpoint() {
        let config = SimulationConfig::default().with_end_time(0.5).with_checkpoints(2);
        let mut driver = dam_break(12).with_config(config.clone());
        let mut writer = MemoryWriter::new();
        driver.run(&mut writer).unwrap();

        let geometry = *driver.state().geometry();
        let bc = *driver.boundaries();
        let mut resumed = SimulationDriver::resume(&writer, geometry, bc, HybridSolver::default())
            .unwrap()
            .with_config(config.with_end_time(1.0));
        assert_eq!(resumed.time(), 0.5);
        assert_eq!(resumed.iteration(), driver.iteration());

        let mut more = MemoryWriter::new();
        let result = resumed.run(&mut more).unwrap();
        // 0.5 is reached already, so only t = 1.0 remains
        assert_eq!(more.times(), vec![1.0]);
        assert_eq!(result.checkpoints_written, 1);
        assert!(resumed.iteration() > driver.iteration());
    }

    #[test]
    fn test_unsplit_and_single_axis_modes() {
        for config in [
            SimulationConfig::default().with_splitting(SplittingMode::Unsplit),
            SimulationConfig::default().with_axes(SweepAxes::XOnly),
            SimulationConfig::default().with_axes(SweepAxes::YOnly),
        ] {
            let mut driver = dam_break(10).with_config(config.clone());
            let before = driver.state().interior_water_sum();
            let report = driver.step(f64::MAX).unwrap();
            assert!(report.dt > 0.0 && report.dt < f64::MAX, "{config:?}");
            assert!(report.vertical_courant.is_none());
            assert!(driver.state().interior_water_sum().is_finite());
            assert!(before > 0.0);
        }
    }

    #[test]
    fn test_fast_y_flow_subcycles_vertical_update() {
        // Uniform flow with v = 10 and c = sqrt(g), so s_y / s_x > 4
        let mut state = GridState::new(10, 10, 1.0, 1.0).unwrap();
        state.h_mut().fill(1.0);
        state.hv_mut().fill(10.0);
        let mut driver =
            SimulationDriver::new(state, BoundaryConditions::periodic(), FWaveSolver::default())
                .unwrap();

        let report = driver.step(f64::MAX).unwrap();
        let c = 9.81f64.sqrt();
        assert!((report.dt - 0.4 / c).abs() < TOL);
        assert!((report.max_speed_y - (10.0 + c)).abs() < TOL);
        // 0.4 · (10 + c) / c ≈ 1.68, cut into steps of at most 0.4
        assert_eq!(report.vertical_substeps, 5);
        assert!(report.vertical_courant.unwrap() <= 0.4 + TOL);
        assert!(!report.vertical_cfl_violated());

        for (x, y) in driver.state().interior_indices() {
            assert!((driver.state().h()[(x, y)] - 1.0).abs() < TOL);
            assert!((driver.state().hv()[(x, y)] - 10.0).abs() < TOL);
        }
    }

    #[test]
    fn test_run_counts_subcycled_steps() {
        let mut state = GridState::new(6, 6, 1.0, 1.0).unwrap();
        state.h_mut().fill(1.0);
        state.hv_mut().fill(10.0);
        let mut driver =
            SimulationDriver::new(state, BoundaryConditions::periodic(), FWaveSolver::default())
                .unwrap()
                .with_config(SimulationConfig::default().with_end_time(1.0).with_checkpoints(1));

        let result = driver.run(&mut MemoryWriter::new()).unwrap();
        // Only the final step, cut short at the checkpoint, may fit in one y update
        assert!(result.subcycled_steps + 1 >= result.n_steps);
        assert!(result.subcycled_steps > 0);
        assert!(result.is_clean());
    }

    #[test]
    fn test_nonfinite_state_detected() {
        let mut driver = still_lake();
        driver.state_mut().set_cell(3, 3, CellState::new(f64::NAN, 0.0, 0.0, 0.0));
        let result = driver.step(0.01);
        assert!(matches!(result, Err(SimulationError::NonFiniteState { .. })));
    }
}
