//! Structural validation of decoded ELLPACK matrices
//!
//! Validation runs once per input matrix before multiplication. The
//! multiplication result is not re-validated: the engine emits each column at
//! most once per row and only columns below `n_cols`, so its output satisfies
//! these invariants by construction.

use num_traits::Num;
use thiserror::Error;

use crate::matrix::{EllpackMatrix, PAD_INDEX};

/// Structural invariant violations in a decoded matrix.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A column index recurs within a row.
    #[error("duplicate column index {col} in row {row}")]
    DuplicateIndex { row: usize, col: usize },

    /// A stored column index is outside `[0, n_cols)`.
    ///
    /// ELLPACK stores each row's *column* indices, so the bound is `n_cols`.
    #[error("column index {col} in row {row} out of bounds (n_cols = {n_cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        n_cols: usize,
    },

    /// A stored entry follows a padding slot within the same row; padding is
    /// tail padding only.
    #[error("row {row}: entry at slot {slot} follows a padding slot")]
    PaddingBeforeEntry { row: usize, slot: usize },
}

/// Checks per-row index well-formedness of `matrix`.
///
/// For each row, walks its `row_capacity` slots maintaining a seen-columns
/// set sized `n_cols`, and reports the first violation found.
pub fn validate<T>(matrix: &EllpackMatrix<T>) -> Result<(), ValidationError>
where
    T: Copy + Num,
{
    let mut seen = vec![false; matrix.n_cols];

    for row in 0..matrix.n_rows {
        let mut in_padding = false;

        for k in 0..matrix.row_capacity {
            let col = matrix.indices[matrix.slot(row, k)];

            if col == PAD_INDEX {
                in_padding = true;
                continue;
            }

            if in_padding {
                return Err(ValidationError::PaddingBeforeEntry { row, slot: k });
            }

            if col >= matrix.n_cols {
                return Err(ValidationError::IndexOutOfBounds {
                    row,
                    col,
                    n_cols: matrix.n_cols,
                });
            }

            if seen[col] {
                return Err(ValidationError::DuplicateIndex { row, col });
            }

            seen[col] = true;
        }

        // Clear only the columns this row touched
        for k in 0..matrix.row_capacity {
            let col = matrix.indices[matrix.slot(row, k)];
            if col != PAD_INDEX && col < matrix.n_cols {
                seen[col] = false;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_matrix() {
        let matrix = EllpackMatrix::new(
            2,
            3,
            2,
            vec![1.0f32, 2.0, 3.0, 0.0],
            vec![0, 2, 1, PAD_INDEX],
        );

        assert!(validate(&matrix).is_ok());
    }

    #[test]
    fn test_empty_rows_are_valid() {
        let matrix = EllpackMatrix::<f32>::zeros(3, 3);
        assert!(validate(&matrix).is_ok());
    }

    #[test]
    fn test_stored_zero_entry_is_valid() {
        // A real zero-valued entry occupies its column like any other entry.
        let matrix = EllpackMatrix::new(1, 2, 2, vec![0.0f32, 4.0], vec![0, 1]);
        assert!(validate(&matrix).is_ok());
    }

    #[test]
    fn test_duplicate_index() {
        let matrix = EllpackMatrix::new(2, 3, 2, vec![1.0f32, 2.0, 3.0, 4.0], vec![0, 0, 1, 2]);

        assert_eq!(
            validate(&matrix),
            Err(ValidationError::DuplicateIndex { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_duplicate_allowed_across_rows() {
        // The same column may of course appear in different rows.
        let matrix = EllpackMatrix::new(2, 3, 1, vec![1.0f32, 2.0], vec![1, 1]);
        assert!(validate(&matrix).is_ok());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let matrix = EllpackMatrix::new(2, 2, 1, vec![1.0f32, 2.0], vec![0, 2]);

        assert_eq!(
            validate(&matrix),
            Err(ValidationError::IndexOutOfBounds {
                row: 1,
                col: 2,
                n_cols: 2
            })
        );
    }

    #[test]
    fn test_entry_after_padding() {
        let matrix = EllpackMatrix::new(1, 3, 2, vec![0.0f32, 1.0], vec![PAD_INDEX, 1]);

        assert_eq!(
            validate(&matrix),
            Err(ValidationError::PaddingBeforeEntry { row: 0, slot: 1 })
        );
    }
}
