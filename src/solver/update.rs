//! Conservative state update from the net-update buffers.
//!
//! For interior cell `(x, y)` the x update reads the right-going update of
//! its left interface and the left-going update of its right interface:
//!
//! ```text
//! h[x][y]  -= dt/dx * (h_right[x-1][y-1]  + h_left[x][y-1])
//! hu[x][y] -= dt/dx * (hu_right[x-1][y-1] + hu_left[x][y-1])
//! ```
//!
//! and the y update likewise reads the vertical buffers:
//!
//! ```text
//! h[x][y]  -= dt/dy * (h_above[x-1][y-1]  + h_below[x-1][y])
//! hv[x][y] -= dt/dy * (hv_above[x-1][y-1] + hv_below[x-1][y])
//! ```
//!
//! Columns are disjoint, so they are updated in parallel. The dry-cell
//! clamp runs on each column right after its update and the per-column
//! reports are merged into one [`UpdateReport`].

use crate::grid::GHOST;

use super::state::{GridState, HorizontalNetUpdates, VerticalNetUpdates};
use super::wetting_drying::{DryCellConfig, UpdateReport, clamp_column};

/// Mutable views of one cell column.
struct CellColumns<'a> {
    h: &'a mut [f64],
    hu: &'a mut [f64],
    hv: &'a mut [f64],
}

/// Which buffers feed an update.
#[derive(Clone, Copy)]
enum Direction {
    X,
    Y,
    Both,
}

/// Coefficients `dt/dx` and `dt/dy`.
#[derive(Clone, Copy)]
struct Ratios {
    x: f64,
    y: f64,
}

fn update_column(
    x: usize,
    cells: CellColumns<'_>,
    direction: Direction,
    ratios: Ratios,
    horizontal: &HorizontalNetUpdates,
    vertical: &VerticalNetUpdates,
    config: &DryCellConfig,
) -> UpdateReport {
    let ny = cells.h.len() - 2 * GHOST;
    // Buffer columns of the interfaces left and right of cell column x
    let (west, east) = (x - GHOST, x + 1 - GHOST);
    // Buffer column holding both horizontal interfaces of column x
    let column = x - GHOST;

    if matches!(direction, Direction::X | Direction::Both) {
        apply_pair(
            &mut cells.h[GHOST..GHOST + ny],
            horizontal.h_right.column(west),
            horizontal.h_left.column(east),
            ratios.x,
        );
        apply_pair(
            &mut cells.hu[GHOST..GHOST + ny],
            horizontal.hu_right.column(west),
            horizontal.hu_left.column(east),
            ratios.x,
        );
    }
    if matches!(direction, Direction::Y | Direction::Both) {
        let h_above = vertical.h_above.column(column);
        let h_below = vertical.h_below.column(column);
        let hv_above = vertical.hv_above.column(column);
        let hv_below = vertical.hv_below.column(column);
        // Cell row y uses slot y-1 below it and slot y above it
        apply_pair(
            &mut cells.h[GHOST..GHOST + ny],
            &h_above[..ny],
            &h_below[1..],
            ratios.y,
        );
        apply_pair(
            &mut cells.hv[GHOST..GHOST + ny],
            &hv_above[..ny],
            &hv_below[1..],
            ratios.y,
        );
    }

    clamp_column(x, GHOST..GHOST + ny, cells.h, cells.hu, cells.hv, config)
}

/// `q[j] -= ratio * (from_before[j] + from_after[j])`
#[inline]
fn apply_pair(q: &mut [f64], from_before: &[f64], from_after: &[f64], ratio: f64) {
    for ((q, before), after) in q.iter_mut().zip(from_before).zip(from_after) {
        *q -= ratio * (before + after);
    }
}

fn apply(
    state: &mut GridState,
    direction: Direction,
    ratios: Ratios,
    config: &DryCellConfig,
) -> UpdateReport {
    let nx = state.nx();
    let GridState {
        h,
        hu,
        hv,
        horizontal,
        vertical,
        ..
    } = state;
    let (horizontal, vertical) = (&*horizontal, &*vertical);

    #[cfg(feature = "parallel")]
    let report = {
        use rayon::prelude::*;
        h.par_columns_mut()
            .zip(hu.par_columns_mut())
            .zip(hv.par_columns_mut())
            .skip(GHOST)
            .take(nx)
            .enumerate()
            .map(|(i, ((h, hu), hv))| {
                let cells = CellColumns { h, hu, hv };
                update_column(i + GHOST, cells, direction, ratios, horizontal, vertical, config)
            })
            .reduce(UpdateReport::default, UpdateReport::merge)
    };

    #[cfg(not(feature = "parallel"))]
    let report = h
        .columns_mut()
        .zip(hu.columns_mut())
        .zip(hv.columns_mut())
        .skip(GHOST)
        .take(nx)
        .enumerate()
        .map(|(i, ((h, hu), hv))| {
            let cells = CellColumns { h, hu, hv };
            update_column(i + GHOST, cells, direction, ratios, horizontal, vertical, config)
        })
        .fold(UpdateReport::default(), UpdateReport::merge);

    report
}

/// Apply the x-sweep updates to `h` and `hu`, then clamp dry cells.
pub fn apply_horizontal(state: &mut GridState, dt: f64, config: &DryCellConfig) -> UpdateReport {
    let ratios = Ratios {
        x: dt / state.dx(),
        y: 0.0,
    };
    apply(state, Direction::X, ratios, config)
}

/// Apply the y-sweep updates to `h` and `hv`, then clamp dry cells.
pub fn apply_vertical(state: &mut GridState, dt: f64, config: &DryCellConfig) -> UpdateReport {
    let ratios = Ratios {
        x: 0.0,
        y: dt / state.dy(),
    };
    apply(state, Direction::Y, ratios, config)
}

/// Unsplit update: `h` receives both directions, `hu` only the x sweep and
/// `hv` only the y sweep. Both sweeps must have run on the same state.
pub fn apply_both(state: &mut GridState, dt: f64, config: &DryCellConfig) -> UpdateReport {
    let ratios = Ratios {
        x: dt / state.dx(),
        y: dt / state.dy(),
    };
    apply(state, Direction::Both, ratios, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::CellState;

    const TOL: f64 = 1e-12;

    fn grid_with_buffers(nx: usize, ny: usize) -> GridState {
        let mut state = GridState::new(nx, ny, 2.0, 4.0).unwrap();
        state.h_mut().fill(10.0);
        state
    }

    #[test]
    fn test_horizontal_reads_neighbouring_slots() {
        let mut state = grid_with_buffers(3, 2);
        // Cell (2, 1): left interface slot (1, 0), right interface slot (2, 0)
        state.horizontal.h_right[(1, 0)] = 1.0;
        state.horizontal.h_left[(2, 0)] = 3.0;
        state.horizontal.hu_right[(1, 0)] = -2.0;
        state.horizontal.hu_left[(2, 0)] = 0.5;

        let dt = 0.5;
        apply_horizontal(&mut state, dt, &DryCellConfig::default());

        let ratio = dt / 2.0;
        assert!((state.h()[(2, 1)] - (10.0 - ratio * 4.0)).abs() < TOL);
        assert!((state.hu()[(2, 1)] - (0.0 - ratio * -1.5)).abs() < TOL);
        // Neighbours see only their own share
        assert!((state.h()[(1, 1)] - 10.0).abs() < TOL);
        assert!((state.h()[(3, 1)] - 10.0).abs() < TOL);
        // Other row untouched
        assert!((state.h()[(2, 2)] - 10.0).abs() < TOL);
    }

    #[test]
    fn test_vertical_reads_neighbouring_slots() {
        let mut state = grid_with_buffers(2, 3);
        // Cell (1, 2): lower interface slot (0, 1), upper interface slot (0, 2)
        state.vertical.h_above[(0, 1)] = 2.0;
        state.vertical.h_below[(0, 2)] = 6.0;
        state.vertical.hv_above[(0, 1)] = 1.0;
        state.vertical.hv_below[(0, 2)] = 1.0;

        let dt = 1.0;
        apply_vertical(&mut state, dt, &DryCellConfig::default());

        let ratio = dt / 4.0;
        assert!((state.h()[(1, 2)] - (10.0 - ratio * 8.0)).abs() < TOL);
        assert!((state.hv()[(1, 2)] - (-ratio * 2.0)).abs() < TOL);
        assert!((state.hu()[(1, 2)]).abs() < TOL);
        assert!((state.h()[(1, 1)] - 10.0).abs() < TOL);
        assert!((state.h()[(2, 2)] - 10.0).abs() < TOL);
    }

    #[test]
    fn test_both_sums_height_and_splits_momentum() {
        let mut state = grid_with_buffers(1, 1);
        state.horizontal.h_right[(0, 0)] = 1.0;
        state.horizontal.h_left[(1, 0)] = 1.0;
        state.horizontal.hu_right[(0, 0)] = 1.0;
        state.vertical.h_above[(0, 0)] = 1.0;
        state.vertical.h_below[(0, 1)] = 1.0;
        state.vertical.hv_below[(0, 1)] = 2.0;

        let dt = 1.0;
        apply_both(&mut state, dt, &DryCellConfig::default());

        // dt/dx = 0.5, dt/dy = 0.25
        assert!((state.h()[(1, 1)] - (10.0 - 0.5 * 2.0 - 0.25 * 2.0)).abs() < TOL);
        assert!((state.hu()[(1, 1)] + 0.5).abs() < TOL);
        assert!((state.hv()[(1, 1)] + 0.5).abs() < TOL);
    }

    #[test]
    fn test_ghost_cells_never_updated() {
        let mut state = grid_with_buffers(2, 2);
        state.horizontal.h_left.fill(1.0);
        state.horizontal.h_right.fill(1.0);
        state.vertical.h_below.fill(1.0);
        state.vertical.h_above.fill(1.0);

        apply_horizontal(&mut state, 1.0, &DryCellConfig::default());
        apply_vertical(&mut state, 1.0, &DryCellConfig::default());

        for x in 0..4 {
            for y in 0..4 {
                let ghost = x == 0 || x == 3 || y == 0 || y == 3;
                if ghost {
                    assert_eq!(state.h()[(x, y)], 10.0, "ghost ({x}, {y}) changed");
                }
            }
        }
    }

    #[test]
    fn test_negative_depth_clamped_and_reported() {
        let mut state = GridState::new(2, 1, 1.0, 1.0).unwrap();
        state.set_cell(1, 1, CellState::new(0.05, 0.3, 0.3, 0.0));
        state.set_cell(2, 1, CellState::new(5.0, 1.0, 1.0, 0.0));
        // Drain cell (1, 1) by far more than it holds
        state.horizontal.h_left[(1, 0)] = 10.0;

        let report = apply_horizontal(&mut state, 0.1, &DryCellConfig::default());

        assert_eq!(state.cell(1, 1), CellState::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(report.clamped_cells, 1);
        assert_eq!(report.severe_cells, 1);
        let worst = report.worst.unwrap();
        assert_eq!((worst.x, worst.y), (1, 1));
        assert!((worst.h - (0.05 - 1.0)).abs() < TOL);
        // Deep cell keeps its momentum
        assert_eq!(state.hv()[(2, 1)], 1.0);
    }

    #[test]
    fn test_shallow_cells_lose_momentum() {
        let mut state = GridState::new(1, 1, 1.0, 1.0).unwrap();
        state.set_cell(1, 1, CellState::new(0.08, 0.5, -0.5, 0.0));
        let report = apply_vertical(&mut state, 0.0, &DryCellConfig::default());
        assert_eq!(state.cell(1, 1), CellState::new(0.08, 0.0, 0.0, 0.0));
        assert_eq!(report.damped_cells, 1);
        assert!(report.is_healthy());
    }
}
