//! Dense row accumulator for ELLPACK multiplication
//!
//! Each output row is built in a dense array indexed by destination column,
//! with an explicit touched marker per column: a legitimate zero-valued
//! product must still be recorded as present, so presence is never inferred
//! from the accumulated value.

use crate::error::{try_alloc_vec, try_with_capacity, Result};

/// Dense accumulator for a single output row.
///
/// Sized to the number of columns of the result and reused across rows
/// without reallocation.
pub struct RowAccumulator {
    /// The dense accumulation array
    values: Vec<f32>,

    /// Flags marking which columns hold a result entry
    touched: Vec<bool>,

    /// Columns touched so far, in first-touch order
    touched_cols: Vec<usize>,
}

impl RowAccumulator {
    /// Create an accumulator for result rows of `n_cols` columns.
    pub fn new(n_cols: usize) -> Result<Self> {
        Ok(Self {
            values: try_alloc_vec(0.0, n_cols, "row accumulator values")?,
            touched: try_alloc_vec(false, n_cols, "row accumulator markers")?,
            touched_cols: Vec::new(),
        })
    }

    /// Accumulate a single product into `col`, marking it present.
    #[inline]
    pub fn accumulate(&mut self, col: usize, val: f32) {
        if !self.touched[col] {
            self.touched[col] = true;
            self.touched_cols.push(col);
            self.values[col] = val;
        } else {
            self.values[col] += val;
        }
    }

    /// Mark `col` present without adding to it.
    ///
    /// Used by the vectorized kernel, which accumulates through
    /// [`values_mut`](Self::values_mut) in bulk and records presence during
    /// the gather phase.
    #[inline]
    pub fn touch(&mut self, col: usize) {
        if !self.touched[col] {
            self.touched[col] = true;
            self.touched_cols.push(col);
        }
    }

    /// Raw access to the dense value array for bulk accumulation.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Extract this row's entries as `(col_indices, values)` sorted by
    /// column, and reset the accumulator for the next row.
    pub fn drain_row(&mut self) -> Result<(Vec<usize>, Vec<f32>)> {
        self.touched_cols.sort_unstable();

        let mut cols = try_with_capacity(self.touched_cols.len(), "result row columns")?;
        let mut vals = try_with_capacity(self.touched_cols.len(), "result row values")?;

        for &col in &self.touched_cols {
            cols.push(col);
            vals.push(self.values[col]);
            self.values[col] = 0.0;
            self.touched[col] = false;
        }
        self.touched_cols.clear();

        Ok((cols, vals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_row() {
        let mut acc = RowAccumulator::new(5).unwrap();
        let (cols, vals) = acc.drain_row().unwrap();
        assert!(cols.is_empty());
        assert!(vals.is_empty());
    }

    #[test]
    fn test_entries_sorted_by_column() {
        let mut acc = RowAccumulator::new(5).unwrap();
        acc.accumulate(3, 4.0);
        acc.accumulate(0, 1.0);
        acc.accumulate(1, 2.0);

        let (cols, vals) = acc.drain_row().unwrap();
        assert_eq!(cols, vec![0, 1, 3]);
        assert_eq!(vals, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_duplicate_columns_sum() {
        let mut acc = RowAccumulator::new(5).unwrap();
        acc.accumulate(2, 1.5);
        acc.accumulate(2, 2.5);
        acc.accumulate(2, 1.0);

        let (cols, vals) = acc.drain_row().unwrap();
        assert_eq!(cols, vec![2]);
        assert_eq!(vals, vec![5.0]);
    }

    #[test]
    fn test_zero_product_is_recorded() {
        // A cancellation down to 0.0 still counts as a stored entry.
        let mut acc = RowAccumulator::new(3).unwrap();
        acc.accumulate(1, 2.0);
        acc.accumulate(1, -2.0);

        let (cols, vals) = acc.drain_row().unwrap();
        assert_eq!(cols, vec![1]);
        assert_eq!(vals, vec![0.0]);
    }

    #[test]
    fn test_touch_marks_without_adding() {
        let mut acc = RowAccumulator::new(3).unwrap();
        acc.touch(2);
        acc.values_mut()[2] = 7.0;

        let (cols, vals) = acc.drain_row().unwrap();
        assert_eq!(cols, vec![2]);
        assert_eq!(vals, vec![7.0]);
    }

    #[test]
    fn test_reuse_across_rows() {
        let mut acc = RowAccumulator::new(5).unwrap();
        acc.accumulate(1, 2.0);
        acc.accumulate(3, 4.0);
        let _ = acc.drain_row().unwrap();

        acc.accumulate(0, 1.0);
        acc.accumulate(4, 5.0);

        let (cols, vals) = acc.drain_row().unwrap();
        assert_eq!(cols, vec![0, 4]);
        assert_eq!(vals, vec![1.0, 5.0]);
    }
}
