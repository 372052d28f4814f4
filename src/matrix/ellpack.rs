//! ELLPACK (ELL) padded sparse matrix format implementation

use std::fmt;

use num_traits::Num;

/// Index sentinel marking an unused (padding) slot.
///
/// A slot is padding if and only if its stored column index equals this
/// sentinel. A numeric value of zero at a valid column index is a legitimate
/// stored entry; no code in this crate tests `value == 0.0` to decide whether
/// a slot exists.
pub const PAD_INDEX: usize = usize::MAX;

/// A sparse matrix in ELLPACK (ELL) padded format
///
/// The ELLPACK format pads every row to a fixed number of value/index slots:
/// - `values`: row-major array of size `n_rows * row_capacity` holding the
///   stored entries of each row, padded with zeros
/// - `indices`: parallel array holding the destination column of each slot,
///   or [`PAD_INDEX`] for padding slots
///
/// `row_capacity` equals the maximum number of stored entries in any row,
/// trading some memory for uniform-stride row access.
#[derive(Clone, PartialEq)]
pub struct EllpackMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Fixed number of slots allocated per row
    pub row_capacity: usize,

    /// Slot values (size: n_rows * row_capacity)
    pub values: Vec<T>,

    /// Slot column indices (size: n_rows * row_capacity)
    pub indices: Vec<usize>,
}

impl<T> EllpackMatrix<T>
where
    T: Copy + Num,
{
    /// Creates a new ELLPACK matrix with the given dimensions and slot data
    ///
    /// # Panics
    ///
    /// Panics if the slot arrays are inconsistent:
    /// - values.len() must be n_rows * row_capacity
    /// - indices.len() must equal values.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_capacity: usize,
        values: Vec<T>,
        indices: Vec<usize>,
    ) -> Self {
        assert_eq!(
            values.len(),
            n_rows * row_capacity,
            "values.len() must be n_rows * row_capacity"
        );
        assert_eq!(
            indices.len(),
            values.len(),
            "indices.len() must equal values.len()"
        );

        Self {
            n_rows,
            n_cols,
            row_capacity,
            values,
            indices,
        }
    }

    /// Creates an empty matrix with the given dimensions and zero row capacity
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_capacity: 0,
            values: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size (row capacity 1)
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_capacity: 1,
            values: vec![T::one(); n],
            indices: (0..n).collect(),
        }
    }

    /// Flat offset of slot `k` in row `r`
    #[inline]
    pub fn slot(&self, r: usize, k: usize) -> usize {
        r * self.row_capacity + k
    }

    /// Whether slot `k` of row `r` is a padding slot
    #[inline]
    pub fn is_padding(&self, r: usize, k: usize) -> bool {
        self.indices[self.slot(r, k)] == PAD_INDEX
    }

    /// Returns an iterator over the stored entries of row `r`
    ///
    /// Each item is a tuple (column, value) for a non-padding slot, in slot
    /// order.
    pub fn row_entries(&self, r: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(r < self.n_rows, "row index out of bounds");

        let start = r * self.row_capacity;
        let end = start + self.row_capacity;

        self.indices[start..end]
            .iter()
            .zip(&self.values[start..end])
            .filter(|(&col, _)| col != PAD_INDEX)
            .map(|(&col, val)| (col, val))
    }

    /// Number of stored (non-padding) entries in row `r`
    pub fn row_nnz(&self, r: usize) -> usize {
        self.row_entries(r).count()
    }

    /// Total number of stored entries in the matrix
    pub fn nnz(&self) -> usize {
        self.indices.iter().filter(|&&col| col != PAD_INDEX).count()
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for EllpackMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EllpackMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  row_capacity: {}", self.row_capacity)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for r in 0..max_rows_to_print {
                write!(f, "    row {}: ", r)?;
                let entries: Vec<_> = self.row_entries(r).collect();

                if entries.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(entries.len());

                    for (col, val) in &entries[..max_elements] {
                        write!(f, "({}, {:?}) ", col, val)?;
                    }

                    if entries.len() > max_elements {
                        write!(f, "... ({} more)", entries.len() - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
