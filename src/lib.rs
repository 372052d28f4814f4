//! # ellgemm: sparse matrix multiplication in the ELLPACK padded format
//!
//! This library stores sparse matrices in the ELLPACK (ELL) format, where
//! every row is padded to a fixed number of value/index slots, and multiplies
//! two such matrices with a row-scatter-accumulate kernel.
//!
//! ## Components
//!
//! - [`matrix`]: the [`EllpackMatrix`] value type and its structural
//!   validator. A slot is padding if and only if its column index is
//!   [`PAD_INDEX`]; a stored zero value is a real entry.
//! - [`io`]: codec for the three-record comma-separated text format, with
//!   `*` denoting padding slots.
//! - [`multiply`]: the multiplication engine, parameterized by a
//!   [`Strategy`] (scalar, vectorized, prefetch, parallel) that changes only
//!   how the inner accumulation loop executes, never the result.
//! - [`compact`]: trims over-padded rows to the minimal shared row capacity.
//! - [`driver`]: the read → validate → multiply → write cycle behind the CLI,
//!   with optional benchmark timing.
//!
//! ## Usage
//!
//! ```
//! use ellgemm::{multiply, EllpackMatrix, Strategy};
//!
//! let a = EllpackMatrix::<f32>::identity(3);
//! let b = EllpackMatrix::<f32>::identity(3);
//!
//! let c = multiply(&a, &b, Strategy::Scalar).unwrap();
//! assert_eq!(c.row_capacity, 1);
//! ```

pub mod compact;
pub mod driver;
pub mod error;
pub mod io;
pub mod matrix;
pub mod multiply;
pub mod utils;

// Re-export primary components
pub use compact::{assemble_rows, compact};
pub use driver::{run, RunOptions, RunSummary};
pub use error::{Error, Record, Result};
pub use matrix::{validate, EllpackMatrix, ValidationError, PAD_INDEX};
pub use multiply::{multiply, Strategy};
pub use utils::{from_sprs_csr, to_dense, to_sprs_csr};

/// Version information for the ellgemm library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
