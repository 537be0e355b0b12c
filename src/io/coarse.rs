//! Block averaging for reduced-resolution output.

use crate::grid::Field2D;

/// Average `scale × scale` blocks of an interior field.
///
/// The result has `ceil(nx / scale) × ceil(ny / scale)` cells. Blocks cut
/// off by the far edges average only the cells they contain. A scale of
/// 0 or 1 returns the field unchanged.
pub fn coarsen(field: &Field2D, scale: usize) -> Field2D {
    if scale <= 1 {
        return field.clone();
    }
    let (nx, ny) = field.shape();
    let cols = nx.div_ceil(scale);
    let rows = ny.div_ceil(scale);

    Field2D::from_fn(cols, rows, |cx, cy| {
        let x0 = cx * scale;
        let y0 = cy * scale;
        let w = scale.min(nx - x0);
        let h = scale.min(ny - y0);
        field.window_sum(x0, y0, w, h) / (w * h) as f64
    })
}
