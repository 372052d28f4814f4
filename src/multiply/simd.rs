//! Vectorized row kernel
//!
//! The columns of a `b` row are not contiguous, so each row of `b` is first
//! gathered into a dense aligned scratch buffer; the accumulation then runs
//! as a lane-width fused multiply-add sweep with the `a` value broadcast
//! across lanes. AVX2/FMA is used on x86_64 when available, NEON on aarch64,
//! and a portable `mul_add` loop elsewhere.

use aligned_vec::AVec;

use crate::error::{try_with_capacity, Result};
use crate::matrix::EllpackMatrix;
use crate::multiply::accumulator::RowAccumulator;
use crate::multiply::RowEntries;

/// Lanes per SIMD sweep step (8 x f32 = 256 bits).
const LANES: usize = 8;

/// Compute all result rows with the vectorized kernel.
pub(crate) fn multiply_rows(
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
) -> Result<Vec<RowEntries>> {
    let n_cols = b.n_cols;

    let mut acc = RowAccumulator::new(n_cols)?;
    let mut rows = try_with_capacity(a.n_rows, "result rows")?;

    // Dense image of one b row, 64-byte aligned for the lane sweep
    let mut scratch: AVec<f32> = AVec::from_iter(64, std::iter::repeat(0.0).take(n_cols));
    let mut written: Vec<usize> = Vec::new();

    for r in 0..a.n_rows {
        for (c, &a_val) in a.row_entries(r) {
            if a_val == 0.0 {
                continue;
            }

            // Gather row c of b into the dense scratch, recording presence
            for (d, &b_val) in b.row_entries(c) {
                scratch[d] = b_val;
                written.push(d);
                acc.touch(d);
            }

            fma_accumulate(a_val, &scratch, acc.values_mut());

            // Clear only the written columns for the next gather
            for &d in &written {
                scratch[d] = 0.0;
            }
            written.clear();
        }

        rows.push(acc.drain_row()?);
    }

    Ok(rows)
}

/// `acc[j] += coeff * xs[j]` over the whole slice, dispatching to the best
/// kernel for the running CPU.
#[inline]
pub(crate) fn fma_accumulate(coeff: f32, xs: &[f32], acc: &mut [f32]) {
    debug_assert_eq!(xs.len(), acc.len());

    #[cfg(target_arch = "x86_64")]
    {
        if std::is_x86_feature_detected!("avx2") && std::is_x86_feature_detected!("fma") {
            // Safety: feature presence checked at runtime
            unsafe { fma_accumulate_avx2(coeff, xs, acc) };
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is baseline on aarch64
        unsafe { fma_accumulate_neon(coeff, xs, acc) };
        return;
    }

    #[allow(unreachable_code)]
    fma_accumulate_portable(coeff, xs, acc);
}

fn fma_accumulate_portable(coeff: f32, xs: &[f32], acc: &mut [f32]) {
    for (x, a) in xs.iter().zip(acc.iter_mut()) {
        *a = coeff.mul_add(*x, *a);
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
unsafe fn fma_accumulate_avx2(coeff: f32, xs: &[f32], acc: &mut [f32]) {
    use std::arch::x86_64::*;

    let n = xs.len();
    let simd_end = n - n % LANES;
    let coeffs = _mm256_set1_ps(coeff);

    let mut j = 0;
    while j < simd_end {
        let x = _mm256_loadu_ps(xs.as_ptr().add(j));
        let a = _mm256_loadu_ps(acc.as_ptr().add(j));
        let fused = _mm256_fmadd_ps(coeffs, x, a);
        _mm256_storeu_ps(acc.as_mut_ptr().add(j), fused);
        j += LANES;
    }

    for j in simd_end..n {
        acc[j] = coeff.mul_add(xs[j], acc[j]);
    }
}

#[cfg(target_arch = "aarch64")]
unsafe fn fma_accumulate_neon(coeff: f32, xs: &[f32], acc: &mut [f32]) {
    use std::arch::aarch64::*;

    let n = xs.len();
    let simd_end = n - n % 4;

    let mut j = 0;
    while j < simd_end {
        let x = vld1q_f32(xs.as_ptr().add(j));
        let a = vld1q_f32(acc.as_ptr().add(j));
        let fused = vfmaq_n_f32(a, x, coeff);
        vst1q_f32(acc.as_mut_ptr().add(j), fused);
        j += 4;
    }

    for j in simd_end..n {
        acc[j] = coeff.mul_add(xs[j], acc[j]);
    }
}
