//! Codec for the three-record ELLPACK text format
//!
//! The format is UTF-8 text with three logical records separated by newlines:
//!
//! ```text
//! 1 | <n_rows>,<n_cols>,<row_capacity>
//! 2 | n_rows * row_capacity comma-separated values (`*` = padding)
//! 3 | n_rows * row_capacity comma-separated column indices (`*` = padding)
//! ```
//!
//! A trailing newline after record 3 is optional; a 4th non-empty record is a
//! format error. When `row_capacity == 0`, records 2 and 3 must be blank.
//!
//! Decoding maps a value `*` to `0.0` and an index `*` to [`PAD_INDEX`]; a
//! numeric index paired with a `*` value decodes as a stored zero-valued
//! entry, for compatibility with writers that conflate the two. The codec
//! never checks index bounds or duplicates; that is the validator's job.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{try_with_capacity, Error, Record, Result};
use crate::matrix::{EllpackMatrix, PAD_INDEX};

/// Dimensions and indices must fit the signed 64-bit range.
const MAX_DIMENSION: u64 = i64::MAX as u64;

/// Reads an ELLPACK matrix from a file.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<EllpackMatrix<f32>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let matrix = parse_matrix(&text, path)?;
    debug!(
        "read {}x{} matrix (row_capacity {}) from {}",
        matrix.n_rows,
        matrix.n_cols,
        matrix.row_capacity,
        path.display()
    );
    Ok(matrix)
}

/// Serializes `matrix` and writes it to a file.
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &EllpackMatrix<f32>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode_matrix(matrix)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses the three-record text format into a matrix.
///
/// `path` is used only for error context.
pub fn parse_matrix(text: &str, path: &Path) -> Result<EllpackMatrix<f32>> {
    let mut lines = text.lines();

    let dims_line = lines.next().ok_or_else(|| format_error(
        path,
        Record::Dimensions,
        "the file is empty".to_string(),
    ))?;
    let (n_rows, n_cols, row_capacity) = parse_dimensions(dims_line, path)?;

    let slots = n_rows.checked_mul(row_capacity).ok_or_else(|| {
        format_error(
            path,
            Record::Dimensions,
            format!("{} * {} slots overflow the addressable range", n_rows, row_capacity),
        )
    })?;

    let values_line = lines.next().unwrap_or("");
    let indices_line = lines.next().unwrap_or("");

    // Exactly 3 records are permitted; blank trailing lines are tolerated.
    for extra in lines {
        if !extra.trim().is_empty() {
            return Err(format_error(
                path,
                Record::Indices,
                "more than three records in the file".to_string(),
            ));
        }
    }

    let values = parse_values(values_line, slots, path)?;
    let indices = parse_indices(indices_line, slots, path)?;

    Ok(EllpackMatrix::new(n_rows, n_cols, row_capacity, values, indices))
}

/// Serializes `matrix` into the three-record text format.
///
/// Padding slots are written as `*` in both the value and index records; a
/// stored zero-valued entry keeps its numeric form, so structure survives the
/// round trip exactly.
pub fn encode_matrix(matrix: &EllpackMatrix<f32>) -> String {
    let slots = matrix.n_rows * matrix.row_capacity;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{},{},{}",
        matrix.n_rows, matrix.n_cols, matrix.row_capacity
    );

    for s in 0..slots {
        if s > 0 {
            out.push(',');
        }
        if matrix.indices[s] == PAD_INDEX {
            out.push('*');
        } else {
            let _ = write!(out, "{}", matrix.values[s]);
        }
    }
    out.push('\n');

    for s in 0..slots {
        if s > 0 {
            out.push(',');
        }
        if matrix.indices[s] == PAD_INDEX {
            out.push('*');
        } else {
            let _ = write!(out, "{}", matrix.indices[s]);
        }
    }
    out.push('\n');

    out
}

fn format_error(path: &Path, record: Record, detail: String) -> Error {
    Error::Format {
        path: path.to_path_buf(),
        record,
        detail,
    }
}

fn parse_dimensions(line: &str, path: &Path) -> Result<(usize, usize, usize)> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(format_error(
            path,
            Record::Dimensions,
            format!("expected 3 numbers, found {}", fields.len()),
        ));
    }

    let mut dims = [0usize; 3];
    for (slot, field) in dims.iter_mut().zip(&fields) {
        let parsed: u64 = field.parse().map_err(|_| {
            format_error(
                path,
                Record::Dimensions,
                format!("`{}` is not a non-negative integer", field),
            )
        })?;
        if parsed > MAX_DIMENSION {
            return Err(format_error(
                path,
                Record::Dimensions,
                format!("`{}` exceeds the signed 64-bit range", field),
            ));
        }
        *slot = usize::try_from(parsed).map_err(|_| {
            format_error(
                path,
                Record::Dimensions,
                format!("`{}` exceeds the addressable range", field),
            )
        })?;
    }

    let [n_rows, n_cols, row_capacity] = dims;

    if n_rows == 0 || n_cols == 0 {
        return Err(format_error(
            path,
            Record::Dimensions,
            "rows and cols must be positive".to_string(),
        ));
    }

    if row_capacity > n_rows {
        return Err(format_error(
            path,
            Record::Dimensions,
            format!("row_capacity {} exceeds rows {}", row_capacity, n_rows),
        ));
    }

    Ok((n_rows, n_cols, row_capacity))
}

/// Splits a value/index record into fields; a blank record has zero fields.
fn split_record(line: &str) -> Vec<&str> {
    if line.trim().is_empty() {
        Vec::new()
    } else {
        line.split(',').map(str::trim).collect()
    }
}

fn check_field_count(
    fields: &[&str],
    slots: usize,
    record: Record,
    path: &Path,
) -> Result<()> {
    if fields.len() != slots {
        let detail = if slots == 0 {
            "record must be blank when row_capacity is 0".to_string()
        } else {
            format!("expected {} fields, found {}", slots, fields.len())
        };
        return Err(format_error(path, record, detail));
    }
    Ok(())
}

fn parse_values(line: &str, slots: usize, path: &Path) -> Result<Vec<f32>> {
    let fields = split_record(line);
    check_field_count(&fields, slots, Record::Values, path)?;

    let mut values = try_with_capacity(slots, "matrix values")?;
    for field in fields {
        if field == "*" {
            values.push(0.0);
        } else {
            let value: f32 = field.parse().map_err(|_| {
                format_error(
                    path,
                    Record::Values,
                    format!("`{}` is not a floating-point literal", field),
                )
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

fn parse_indices(line: &str, slots: usize, path: &Path) -> Result<Vec<usize>> {
    let fields = split_record(line);
    check_field_count(&fields, slots, Record::Indices, path)?;

    let mut indices = try_with_capacity(slots, "matrix indices")?;
    for field in fields {
        if field == "*" {
            indices.push(PAD_INDEX);
        } else {
            let parsed: u64 = field.parse().map_err(|_| {
                format_error(
                    path,
                    Record::Indices,
                    format!("`{}` is not a non-negative integer", field),
                )
            })?;
            if parsed > MAX_DIMENSION {
                return Err(format_error(
                    path,
                    Record::Indices,
                    format!("`{}` exceeds the signed 64-bit range", field),
                ));
            }
            indices.push(parsed as usize);
        }
    }
    Ok(indices)
}
