//! ELLPACK sparse matrix multiplication engine
//!
//! One scatter-accumulate algorithm, parameterized by an execution strategy
//! that changes only how the inner accumulation loop runs, never the result:
//!
//! 1. Per row of `a`, products scatter into a dense accumulator indexed by
//!    destination column, with explicit presence markers.
//! 2. Each row compacts to `(column, value)` pairs in ascending column order.
//! 3. The result's row capacity is the maximum per-row entry count; every row
//!    is re-padded to it.
//!
//! All strategies produce identical output; the vectorized path may differ
//! from the scalar one within fused-multiply-add rounding.

pub mod accumulator;
pub mod parallel;
pub mod prefetch;
pub mod scalar;
pub mod simd;

use std::fmt;
use std::str::FromStr;

use crate::compact::assemble_rows;
use crate::error::{Error, Result};
use crate::matrix::EllpackMatrix;

pub use accumulator::RowAccumulator;

/// One result row as sorted `(col_indices, values)` lists.
pub(crate) type RowEntries = (Vec<usize>, Vec<f32>);

/// Execution strategy for the inner accumulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain nested scatter-accumulate loop
    Scalar,
    /// Lane-width fused multiply-add over gathered rows of `b`
    Vectorized,
    /// Scalar loop with prefetch hints one iteration ahead
    Prefetch,
    /// Rows of `a` distributed across the Rayon worker pool
    Parallel,
}

impl Strategy {
    /// Resolve a numeric version tag (the CLI's `-V` argument).
    pub fn from_version(version: u8) -> Option<Self> {
        match version {
            0 => Some(Strategy::Scalar),
            1 => Some(Strategy::Vectorized),
            2 => Some(Strategy::Prefetch),
            3 => Some(Strategy::Parallel),
            _ => None,
        }
    }

    /// The numeric version tag of this strategy.
    pub fn version(&self) -> u8 {
        match self {
            Strategy::Scalar => 0,
            Strategy::Vectorized => 1,
            Strategy::Prefetch => 2,
            Strategy::Parallel => 3,
        }
    }

    /// All strategies, in version-tag order.
    pub fn all() -> [Strategy; 4] {
        [
            Strategy::Scalar,
            Strategy::Vectorized,
            Strategy::Prefetch,
            Strategy::Parallel,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Scalar => write!(f, "scalar"),
            Strategy::Vectorized => write!(f, "vectorized"),
            Strategy::Prefetch => write!(f, "prefetch"),
            Strategy::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "scalar" => Ok(Strategy::Scalar),
            "vectorized" => Ok(Strategy::Vectorized),
            "prefetch" => Ok(Strategy::Prefetch),
            "parallel" => Ok(Strategy::Parallel),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(Strategy::from_version)
                .ok_or_else(|| format!("unknown strategy `{}`", other)),
        }
    }
}

/// Computes the sparse product `a * b`.
///
/// Requires `a.n_cols == b.n_rows`; the result has `a.n_rows` rows,
/// `b.n_cols` columns, and the minimal row capacity for its entries. Inputs
/// are expected to be structurally valid (see [`crate::matrix::validate`]);
/// the output is valid by construction and needs no re-validation.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if the shapes are incompatible, or
/// [`Error::OutOfMemory`] if a buffer cannot be allocated; no partial result
/// escapes in either case.
pub fn multiply(
    a: &EllpackMatrix<f32>,
    b: &EllpackMatrix<f32>,
    strategy: Strategy,
) -> Result<EllpackMatrix<f32>> {
    if a.n_cols != b.n_rows {
        return Err(Error::DimensionMismatch {
            a_rows: a.n_rows,
            a_cols: a.n_cols,
            b_rows: b.n_rows,
            b_cols: b.n_cols,
        });
    }

    let rows = match strategy {
        Strategy::Scalar => scalar::multiply_rows(a, b)?,
        Strategy::Vectorized => simd::multiply_rows(a, b)?,
        Strategy::Prefetch => prefetch::multiply_rows(a, b)?,
        Strategy::Parallel => parallel::multiply_rows(a, b)?,
    };

    assemble_rows(a.n_rows, b.n_cols, rows)
}
