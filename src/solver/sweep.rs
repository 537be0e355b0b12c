//! Flux sweeps: one Riemann solve per cell interface.
//!
//! Each sweep walks the net-update buffers column by column. Every
//! interface writes its own buffer slot, so columns are handed to rayon
//! workers without any locking. The only value shared between workers is
//! the maximum wave speed, combined with a fork-join `reduce` whose
//! combine function is `f64::max` and whose identity is `0.0`.

use crate::grid::{Field2D, GHOST};
use crate::riemann::{InterfaceState, RiemannSolver};

use super::state::{GridState, HorizontalNetUpdates, VerticalNetUpdates};

/// Mutable views of one column of the four net-update buffers.
struct UpdateColumns<'a> {
    h_first: &'a mut [f64],
    h_second: &'a mut [f64],
    hu_first: &'a mut [f64],
    hu_second: &'a mut [f64],
}

/// Solve every interface between cell columns `x - 1` and `x`, where `x`
/// belongs to buffer column `i`.
fn horizontal_column<S: RiemannSolver>(
    solver: &S,
    i: usize,
    h: &Field2D,
    hu: &Field2D,
    b: &Field2D,
    out: UpdateColumns<'_>,
) -> f64 {
    let x = i + GHOST;
    let (h_l, hu_l, b_l) = (h.column(x - 1), hu.column(x - 1), b.column(x - 1));
    let (h_r, hu_r, b_r) = (h.column(x), hu.column(x), b.column(x));

    let mut max_speed = 0.0_f64;
    for j in 0..out.h_first.len() {
        let y = j + GHOST;
        let updates = solver.compute_net_updates(
            InterfaceState::new(h_l[y], hu_l[y], b_l[y]),
            InterfaceState::new(h_r[y], hu_r[y], b_r[y]),
        );
        out.h_first[j] = updates.h_left;
        out.h_second[j] = updates.h_right;
        out.hu_first[j] = updates.hu_left;
        out.hu_second[j] = updates.hu_right;
        max_speed = max_speed.max(updates.max_wave_speed);
    }
    max_speed
}

/// Solve every interface between rows `y - 1` and `y` of cell column
/// `i + GHOST`.
fn vertical_column<S: RiemannSolver>(
    solver: &S,
    i: usize,
    h: &Field2D,
    hv: &Field2D,
    b: &Field2D,
    out: UpdateColumns<'_>,
) -> f64 {
    let x = i + GHOST;
    let (h_c, hv_c, b_c) = (h.column(x), hv.column(x), b.column(x));

    let mut max_speed = 0.0_f64;
    for j in 0..out.h_first.len() {
        let y = j + GHOST;
        let updates = solver.compute_net_updates(
            InterfaceState::new(h_c[y - 1], hv_c[y - 1], b_c[y - 1]),
            InterfaceState::new(h_c[y], hv_c[y], b_c[y]),
        );
        out.h_first[j] = updates.h_left;
        out.h_second[j] = updates.h_right;
        out.hu_first[j] = updates.hu_left;
        out.hu_second[j] = updates.hu_right;
        max_speed = max_speed.max(updates.max_wave_speed);
    }
    max_speed
}

/// Compute net updates for every vertical interface (x direction).
///
/// Covers interfaces `x = 1..=nx+1`, `y = 1..=ny`, including the two
/// bordering the left and right ghost columns. Returns the largest wave
/// speed seen, or 0 when no interface carries a wave.
pub fn sweep_horizontal<S: RiemannSolver>(state: &mut GridState, solver: &S) -> f64 {
    let GridState {
        h,
        hu,
        b,
        horizontal,
        ..
    } = state;
    let (h, hu, b) = (&*h, &*hu, &*b);
    let HorizontalNetUpdates {
        h_left,
        h_right,
        hu_left,
        hu_right,
    } = horizontal;

    #[cfg(feature = "parallel")]
    let max_speed = {
        use rayon::prelude::*;
        h_left
            .par_columns_mut()
            .zip(h_right.par_columns_mut())
            .zip(hu_left.par_columns_mut())
            .zip(hu_right.par_columns_mut())
            .enumerate()
            .map(|(i, (((h_first, h_second), hu_first), hu_second))| {
                let out = UpdateColumns {
                    h_first,
                    h_second,
                    hu_first,
                    hu_second,
                };
                horizontal_column(solver, i, h, hu, b, out)
            })
            .reduce(|| 0.0, f64::max)
    };

    #[cfg(not(feature = "parallel"))]
    let max_speed = h_left
        .columns_mut()
        .zip(h_right.columns_mut())
        .zip(hu_left.columns_mut())
        .zip(hu_right.columns_mut())
        .enumerate()
        .map(|(i, (((h_first, h_second), hu_first), hu_second))| {
            let out = UpdateColumns {
                h_first,
                h_second,
                hu_first,
                hu_second,
            };
            horizontal_column(solver, i, h, hu, b, out)
        })
        .fold(0.0, f64::max);

    max_speed
}

/// Compute net updates for every horizontal interface (y direction).
///
/// Covers interfaces `x = 1..=nx`, `y = 1..=ny+1`, including the two
/// bordering the bottom and top ghost rows. The normal momentum is `hv`.
pub fn sweep_vertical<S: RiemannSolver>(state: &mut GridState, solver: &S) -> f64 {
    let GridState {
        h, hv, b, vertical, ..
    } = state;
    let (h, hv, b) = (&*h, &*hv, &*b);
    let VerticalNetUpdates {
        h_below,
        h_above,
        hv_below,
        hv_above,
    } = vertical;

    #[cfg(feature = "parallel")]
    let max_speed = {
        use rayon::prelude::*;
        h_below
            .par_columns_mut()
            .zip(h_above.par_columns_mut())
            .zip(hv_below.par_columns_mut())
            .zip(hv_above.par_columns_mut())
            .enumerate()
            .map(|(i, (((h_first, h_second), hu_first), hu_second))| {
                let out = UpdateColumns {
                    h_first,
                    h_second,
                    hu_first,
                    hu_second,
                };
                vertical_column(solver, i, h, hv, b, out)
            })
            .reduce(|| 0.0, f64::max)
    };

    #[cfg(not(feature = "parallel"))]
    let max_speed = h_below
        .columns_mut()
        .zip(h_above.columns_mut())
        .zip(hv_below.columns_mut())
        .zip(hv_above.columns_mut())
        .enumerate()
        .map(|(i, (((h_first, h_second), hu_first), hu_second))| {
            let out = UpdateColumns {
                h_first,
                h_second,
                hu_first,
                hu_second,
            };
            vertical_column(solver, i, h, hv, b, out)
        })
        .fold(0.0, f64::max);

    max_speed
}
