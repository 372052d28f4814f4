//! Conversions between ELLPACK storage and external matrix libraries

use ndarray::Array2;
use num_traits::Num;
use sprs::CsMat;

use crate::matrix::{EllpackMatrix, PAD_INDEX};

/// Converts an ELLPACK matrix to a sprs CSR matrix.
///
/// Entries are sorted by column within each row, as CSR requires; padding
/// slots are dropped.
pub fn to_sprs_csr<T>(matrix: &EllpackMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut row_ptr = Vec::with_capacity(matrix.n_rows + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(0);

    for r in 0..matrix.n_rows {
        let mut entries: Vec<(usize, T)> = matrix.row_entries(r).map(|(c, &v)| (c, v)).collect();
        entries.sort_unstable_by_key(|&(col, _)| col);

        for (col, val) in entries {
            col_idx.push(col);
            values.push(val);
        }
        row_ptr.push(col_idx.len());
    }

    CsMat::new((matrix.n_rows, matrix.n_cols), row_ptr, col_idx, values)
}

/// Converts a sprs matrix to ELLPACK storage with the minimal row capacity.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> EllpackMatrix<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, col_idx, data) = matrix.into_raw_storage();

    let row_capacity = (0..n_rows)
        .map(|r| indptr[r + 1] - indptr[r])
        .max()
        .unwrap_or(0);

    let mut values = vec![T::zero(); n_rows * row_capacity];
    let mut indices = vec![PAD_INDEX; n_rows * row_capacity];

    for r in 0..n_rows {
        for (k, s) in (indptr[r]..indptr[r + 1]).enumerate() {
            values[r * row_capacity + k] = data[s];
            indices[r * row_capacity + k] = col_idx[s];
        }
    }

    EllpackMatrix::new(n_rows, n_cols, row_capacity, values, indices)
}

/// Expands an ELLPACK matrix to a dense array.
pub fn to_dense<T>(matrix: &EllpackMatrix<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::from_elem((matrix.n_rows, matrix.n_cols), T::zero());

    for r in 0..matrix.n_rows {
        for (col, &val) in matrix.row_entries(r) {
            dense[[r, col]] = val;
        }
    }

    dense
}
