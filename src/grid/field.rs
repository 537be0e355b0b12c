//! Dense 2D arrays indexed `[x][y]`.
//!
//! Storage is column-major: every x column is one contiguous slice of
//! length `rows`. Sweeps and updates hand whole columns to worker threads,
//! so the column layout is what makes the parallel loops borrow-checkable.
//!
//! Cell fields carry a ghost layer of width [`GHOST`] on every side;
//! interior cells live at `x ∈ GHOST..GHOST + nx`, `y ∈ GHOST..GHOST + ny`.
//! Net-update buffers use the same type without a ghost layer.

use std::ops::{Index, IndexMut, Range};

/// Width of the ghost layer around every cell field.
pub const GHOST: usize = 1;

/// Column-major `f64` array of `cols × rows` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Zero-filled array with `cols` x-columns of `rows` entries each.
    pub fn zeros(cols: usize, rows: usize) -> Self {
        Self::filled(cols, rows, 0.0)
    }

    pub fn filled(cols: usize, rows: usize, value: f64) -> Self {
        Self {
            cols,
            rows,
            data: vec![value; cols * rows],
        }
    }

    /// Build from column-major data. Returns `None` on a length mismatch.
    pub fn from_vec(cols: usize, rows: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == cols * rows).then_some(Self { cols, rows, data })
    }

    /// Build by evaluating `f(x, y)` for every entry.
    pub fn from_fn<F>(cols: usize, rows: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(cols * rows);
        for x in 0..cols {
            for y in 0..rows {
                data.push(f(x, y));
            }
        }
        Self { cols, rows, data }
    }

    /// Number of x columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entries per column.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.cols && y < self.rows,
            "index ({x}, {y}) out of bounds for {}x{} field",
            self.cols,
            self.rows
        );
        x * self.rows + y
    }

    /// Value at `(x, y)`, or `None` outside the array.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.cols && y < self.rows).then(|| self.data[x * self.rows + y])
    }

    #[inline]
    pub fn column(&self, x: usize) -> &[f64] {
        let start = x * self.rows;
        &self.data[start..start + self.rows]
    }

    #[inline]
    pub fn column_mut(&mut self, x: usize) -> &mut [f64] {
        let start = x * self.rows;
        &mut self.data[start..start + self.rows]
    }

    /// Chunk length of one column; an empty field has no columns to yield.
    #[inline]
    fn chunk_len(&self) -> usize {
        self.rows.max(1)
    }

    /// Iterate over columns in x order.
    ///
    /// A field with zero rows yields no columns.
    pub fn columns(&self) -> std::slice::Chunks<'_, f64> {
        self.data.chunks(self.chunk_len())
    }

    pub fn columns_mut(&mut self) -> std::slice::ChunksMut<'_, f64> {
        let len = self.chunk_len();
        self.data.chunks_mut(len)
    }

    /// Parallel iterator over mutable columns.
    #[cfg(feature = "parallel")]
    pub fn par_columns_mut(&mut self) -> rayon::slice::ChunksMut<'_, f64> {
        use rayon::prelude::*;
        let len = self.chunk_len();
        self.data.par_chunks_mut(len)
    }

    /// Parallel iterator over columns.
    #[cfg(feature = "parallel")]
    pub fn par_columns(&self) -> rayon::slice::Chunks<'_, f64> {
        use rayon::prelude::*;
        self.data.par_chunks(self.chunk_len())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Copy rows `rows` of column `src` into the same rows of column `dst`.
    pub fn copy_column(&mut self, src: usize, dst: usize, rows: Range<usize>) {
        let src_start = self.offset(src, 0);
        let dst_start = self.offset(dst, 0);
        self.data.copy_within(
            src_start + rows.start..src_start + rows.end,
            dst_start + rows.start,
        );
    }

    /// Copy row `src` into row `dst` for every column in `cols`.
    pub fn copy_row(&mut self, src: usize, dst: usize, cols: Range<usize>) {
        for x in cols {
            let value = self[(x, src)];
            self[(x, dst)] = value;
        }
    }

    /// Sub-array `[x0, x0 + cols) × [y0, y0 + rows)` as a new field.
    pub fn window(&self, x0: usize, y0: usize, cols: usize, rows: usize) -> Self {
        Self::from_fn(cols, rows, |x, y| self[(x0 + x, y0 + y)])
    }

    /// Sum over the sub-array `[x0, x0 + cols) × [y0, y0 + rows)`.
    pub fn window_sum(&self, x0: usize, y0: usize, cols: usize, rows: usize) -> f64 {
        (x0..x0 + cols)
            .map(|x| self.column(x)[y0..y0 + rows].iter().sum::<f64>())
            .sum()
    }

    /// Largest absolute entry, 0 for an empty field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

impl Index<(usize, usize)> for Field2D {
    type Output = f64;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &f64 {
        &self.data[self.offset(x, y)]
    }
}

impl IndexMut<(usize, usize)> for Field2D {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f64 {
        let i = self.offset(x, y);
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_layout() {
        let f = Field2D::from_fn(3, 2, |x, y| (10 * x + y) as f64);
        assert_eq!(f.as_slice(), &[0.0, 1.0, 10.0, 11.0, 20.0, 21.0]);
        assert_eq!(f.column(1), &[10.0, 11.0]);
        assert_eq!(f[(2, 1)], 21.0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let f = Field2D::zeros(4, 5);
        assert_eq!(f.get(3, 4), Some(0.0));
        assert_eq!(f.get(4, 0), None);
        assert_eq!(f.get(0, 5), None);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Field2D::from_vec(2, 2, vec![0.0; 3]).is_none());
        assert!(Field2D::from_vec(2, 2, vec![0.0; 4]).is_some());
    }

    #[test]
    fn test_copy_column_partial_range() {
        let mut f = Field2D::from_fn(3, 4, |x, y| (10 * x + y) as f64);
        f.copy_column(1, 0, 1..3);
        assert_eq!(f.column(0), &[0.0, 11.0, 12.0, 3.0]);
        assert_eq!(f.column(1), &[10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_copy_row() {
        let mut f = Field2D::from_fn(4, 3, |x, y| (10 * x + y) as f64);
        f.copy_row(1, 0, 1..3);
        assert_eq!(f[(0, 0)], 0.0);
        assert_eq!(f[(1, 0)], 11.0);
        assert_eq!(f[(2, 0)], 21.0);
        assert_eq!(f[(3, 0)], 30.0);
    }

    #[test]
    fn test_window_and_sum() {
        let f = Field2D::from_fn(4, 4, |x, y| (x * 4 + y) as f64);
        let w = f.window(1, 1, 2, 2);
        assert_eq!(w.shape(), (2, 2));
        assert_eq!(w.as_slice(), &[5.0, 6.0, 9.0, 10.0]);
        assert_eq!(f.window_sum(1, 1, 2, 2), 30.0);
    }

    #[test]
    fn test_columns_iterate_in_x_order() {
        let mut f = Field2D::zeros(3, 2);
        for (x, col) in f.columns_mut().enumerate() {
            col.fill(x as f64);
        }
        assert_eq!(f[(0, 1)], 0.0);
        assert_eq!(f[(2, 0)], 2.0);
        assert_eq!(f.columns().count(), 3);
        assert_eq!(f.max_abs(), 2.0);
    }

    #[test]
    fn test_zero_row_field_has_no_columns() {
        let mut f = Field2D::zeros(4, 0);
        assert_eq!(f.shape(), (4, 0));
        assert_eq!(f.columns().count(), 0);
        assert_eq!(f.columns_mut().count(), 0);
        assert_eq!(f.max_abs(), 0.0);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            assert_eq!(f.par_columns().count(), 0);
            assert_eq!(f.par_columns_mut().count(), 0);
        }
    }
}
