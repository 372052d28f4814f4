//! Error types shared by every fallible operation in the crate.
//!
//! All errors are terminal for the operation that raised them: there is no
//! local recovery or retry anywhere in the core. Partially built buffers are
//! released by ordinary drop before the error propagates.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use crate::matrix::ValidationError;

/// Result type alias for ellgemm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The three logical records of the ELLPACK text format, named for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Dimensions,
    Values,
    Indices,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Dimensions => write!(f, "dimension record (record 1)"),
            Record::Values => write!(f, "value record (record 2)"),
            Record::Indices => write!(f, "index record (record 3)"),
        }
    }
}

/// Errors raised by the codec, validator, multiply engine and driver.
#[derive(Debug, Error)]
pub enum Error {
    /// File cannot be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed ELLPACK text: wrong record or field count, non-numeric
    /// field, zero dimension, capacity exceeding rows, dimension overflow.
    #[error("{}: malformed {record}: {detail}", path.display())]
    Format {
        path: PathBuf,
        record: Record,
        detail: String,
    },

    /// Structural invariant violated in a decoded matrix.
    #[error("{}: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    /// `a.n_cols != b.n_rows`; no result is produced.
    #[error(
        "matrix dimensions do not match for multiplication: \
         {a_rows}x{a_cols} * {b_rows}x{b_cols}"
    )]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    /// Allocation failure at any stage; fatal for the operation.
    #[error("memory allocation failed ({context})")]
    OutOfMemory { context: &'static str },
}

impl Error {
    /// Exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io { .. } => ExitCode::from(2),
            Self::Format { .. } => ExitCode::from(3),
            Self::Validation { .. } => ExitCode::from(4),
            Self::DimensionMismatch { .. } => ExitCode::from(5),
            Self::OutOfMemory { .. } => ExitCode::from(6),
        }
    }
}

/// Allocate a zero-initialized buffer, surfacing allocation failure as
/// [`Error::OutOfMemory`] instead of aborting.
pub(crate) fn try_alloc_vec<T: Clone>(
    value: T,
    len: usize,
    context: &'static str,
) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { context })?;
    buf.resize(len, value);
    Ok(buf)
}

/// Reserve capacity on an empty `Vec`, surfacing allocation failure as
/// [`Error::OutOfMemory`].
pub(crate) fn try_with_capacity<T>(len: usize, context: &'static str) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { context })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let errors = [
            Error::Io {
                path: PathBuf::from("a"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "x"),
            },
            Error::Format {
                path: PathBuf::from("a"),
                record: Record::Dimensions,
                detail: "x".into(),
            },
            Error::DimensionMismatch {
                a_rows: 1,
                a_cols: 2,
                b_rows: 3,
                b_cols: 4,
            },
            Error::OutOfMemory { context: "x" },
        ];

        let codes: Vec<_> = errors.iter().map(|e| format!("{:?}", e.exit_code())).collect();
        for (i, code) in codes.iter().enumerate() {
            assert_ne!(code, &format!("{:?}", ExitCode::SUCCESS));
            for other in &codes[i + 1..] {
                assert_ne!(code, other);
            }
        }
    }

    #[test]
    fn test_try_alloc_vec() {
        let buf = try_alloc_vec(0.0f32, 8, "test buffer").unwrap();
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|&v| v == 0.0));
    }
}
