//! Scalar scatter-accumulate row kernel

use crate::error::{try_with_capacity, Result};
use crate::matrix::EllpackMatrix;
use crate::multiply::accumulator::RowAccumulator;
use crate::multiply::RowEntries;

/// Multiply row `r` of `a` with `b`, scattering products into `acc`.
///
/// A stored zero in `a` is skipped as an algebraic no-op; stored zeros in `b`
/// are accumulated so the destination column is recorded as present.
#[inline]
pub(crate) fn multiply_row(
    r: usize,
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
    acc: &mut RowAccumulator,
) {
    for (c, &a_val) in a.row_entries(r) {
        if a_val == 0.0 {
            continue;
        }

        for (d, &b_val) in b.row_entries(c) {
            acc.accumulate(d, a_val * b_val);
        }
    }
}

/// Compute all result rows serially with one reused accumulator.
pub(crate) fn multiply_rows(
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
) -> Result<Vec<RowEntries>> {
    let mut acc = RowAccumulator::new(b.n_cols)?;
    let mut rows = try_with_capacity(a.n_rows, "result rows")?;

    for r in 0..a.n_rows {
        multiply_row(r, a, b, &mut acc);
        rows.push(acc.drain_row()?);
    }

    Ok(rows)
}
