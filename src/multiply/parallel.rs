//! Row-parallel multiply driver
//!
//! Rows of `a` are independent units of work: each row writes only its own
//! accumulator, so rows are distributed across the Rayon worker pool with no
//! shared mutable state. The matrix-wide row capacity is reduced afterwards
//! from the collected per-row entry counts.

use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::EllpackMatrix;
use crate::multiply::accumulator::RowAccumulator;
use crate::multiply::{scalar, RowEntries};

/// Compute all result rows in parallel, preserving row order.
pub(crate) fn multiply_rows(
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
) -> Result<Vec<RowEntries>> {
    (0..a.n_rows)
        .into_par_iter()
        .map(|r| {
            let mut acc = RowAccumulator::new(b.n_cols)?;
            scalar::multiply_row(r, a, b, &mut acc);
            acc.drain_row()
        })
        .collect()
}
