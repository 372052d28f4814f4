//! Compaction of row entry lists into minimally padded ELLPACK storage
//!
//! The multiply engine produces one sorted entry list per row; this module
//! determines the matrix-wide row capacity (the maximum per-row entry count)
//! and re-pads every row to it. The same pass also serves standalone: any
//! matrix stored with an over-wide row capacity can be re-emitted at its
//! minimal width.

use num_traits::Num;

use crate::error::{try_with_capacity, Result};
use crate::matrix::{EllpackMatrix, PAD_INDEX};

/// Assemble per-row `(col_indices, values)` lists into an ELLPACK matrix
/// with the minimal shared row capacity.
///
/// Column order within each row is preserved; padding slots carry
/// [`PAD_INDEX`] and a zero value.
pub fn assemble_rows<T>(
    n_rows: usize,
    n_cols: usize,
    rows: Vec<(Vec<usize>, Vec<T>)>,
) -> Result<EllpackMatrix<T>>
where
    T: Copy + Num,
{
    debug_assert_eq!(rows.len(), n_rows);

    let row_capacity = rows.iter().map(|(cols, _)| cols.len()).max().unwrap_or(0);
    let slots = n_rows * row_capacity;

    let mut values = try_with_capacity(slots, "assembled values")?;
    let mut indices = try_with_capacity(slots, "assembled indices")?;

    for (cols, vals) in rows {
        debug_assert_eq!(cols.len(), vals.len());

        let used = cols.len();
        indices.extend(cols);
        values.extend(vals);

        for _ in used..row_capacity {
            indices.push(PAD_INDEX);
            values.push(T::zero());
        }
    }

    Ok(EllpackMatrix::new(n_rows, n_cols, row_capacity, values, indices))
}

/// Re-emit `matrix` with the minimal row capacity for its entries.
///
/// Rows keep their entries in slot order; only trailing padding is trimmed.
pub fn compact<T>(matrix: &EllpackMatrix<T>) -> Result<EllpackMatrix<T>>
where
    T: Copy + Num,
{
    let mut rows = try_with_capacity(matrix.n_rows, "compacted rows")?;

    for r in 0..matrix.n_rows {
        let mut cols = try_with_capacity(matrix.row_nnz(r), "compacted row columns")?;
        let mut vals = try_with_capacity(matrix.row_nnz(r), "compacted row values")?;

        for (col, &val) in matrix.row_entries(r) {
            cols.push(col);
            vals.push(val);
        }

        rows.push((cols, vals));
    }

    assemble_rows(matrix.n_rows, matrix.n_cols, rows)
}
