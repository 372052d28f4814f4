//! Prefetch-enhanced scalar row kernel
//!
//! Same accumulation as the scalar kernel, with explicit prefetch hints
//! issued one iteration ahead: the next slot of `a`'s row into L1, and the
//! row of `b` that slot will walk into L2.

use crate::error::{try_with_capacity, Result};
use crate::matrix::{EllpackMatrix, PAD_INDEX};
use crate::multiply::accumulator::RowAccumulator;
use crate::multiply::RowEntries;
use crate::utils::prefetch::{prefetch_read_l1, prefetch_read_l2};

/// Compute all result rows with one-iteration-ahead prefetching.
pub(crate) fn multiply_rows(
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
) -> Result<Vec<RowEntries>> {
    let mut acc = RowAccumulator::new(b.n_cols)?;
    let mut rows = try_with_capacity(a.n_rows, "result rows")?;

    for r in 0..a.n_rows {
        for k in 0..a.row_capacity {
            let s = a.slot(r, k);

            if k + 1 < a.row_capacity {
                prefetch_next_slot(a, b, s + 1);
            }

            let c = a.indices[s];
            if c == PAD_INDEX {
                continue;
            }

            let a_val = a.values[s];
            if a_val == 0.0 {
                continue;
            }

            let b_start = c * b.row_capacity;
            for t in b_start..b_start + b.row_capacity {
                let d = b.indices[t];
                if d == PAD_INDEX {
                    continue;
                }
                acc.accumulate(d, a_val * b.values[t]);
            }
        }

        rows.push(acc.drain_row()?);
    }

    Ok(rows)
}

/// Hint the next `a` slot (L1) and the `b` row it selects (L2).
#[inline(always)]
fn prefetch_next_slot(a: &EllpackMatrix<f32>, b: &EllpackMatrix<f32>, next: usize) {
    unsafe {
        prefetch_read_l1(a.values.as_ptr().add(next));
        prefetch_read_l1(a.indices.as_ptr().add(next));
    }

    let next_c = a.indices[next];
    if next_c != PAD_INDEX && next_c < b.n_rows && b.row_capacity > 0 {
        let b_start = next_c * b.row_capacity;
        unsafe {
            prefetch_read_l2(b.values.as_ptr().add(b_start));
            prefetch_read_l2(b.indices.as_ptr().add(b_start));
        }
    }
}
