//! Correctness tests for the multiply engine against handwritten scenarios
//! and a dense reference product

use std::path::PathBuf;

use ndarray::Array2;

use ellgemm::io::{encode_matrix, parse_matrix};
use ellgemm::{compact, multiply, to_dense, EllpackMatrix, Error, Strategy, PAD_INDEX};

fn parse(text: &str) -> EllpackMatrix<f32> {
    parse_matrix(text, &PathBuf::from("test-input")).unwrap()
}

/// Naive dense product used as the reference result.
fn dense_product(a: &EllpackMatrix<f32>, b: &EllpackMatrix<f32>) -> Array2<f32> {
    to_dense(a).dot(&to_dense(b))
}

fn assert_dense_eq(result: &EllpackMatrix<f32>, expected: &Array2<f32>) {
    let dense = to_dense(result);
    assert_eq!(dense.dim(), expected.dim());
    for (got, want) in dense.iter().zip(expected.iter()) {
        assert!(
            (got - want).abs() <= 1e-5 * want.abs().max(1.0),
            "{} vs {}",
            got,
            want
        );
    }
}

#[test]
fn test_concrete_scenario() {
    // A = [[5,*],[*,6]] times I2 yields 2,2,1 / 5.0,6.0 / 0,1
    let a = parse("2,2,2\n5.0,*,*,6.0\n0,*,*,1\n");
    let i2 = parse("2,2,1\n1.0,1.0\n0,1\n");

    let c = multiply(&a, &i2, Strategy::Scalar).unwrap();

    assert_eq!(c.n_rows, 2);
    assert_eq!(c.n_cols, 2);
    assert_eq!(c.row_capacity, 1);
    assert_eq!(c.values, vec![5.0, 6.0]);
    assert_eq!(c.indices, vec![0, 1]);
    assert_eq!(encode_matrix(&c), "2,2,1\n5,6\n0,1\n");
}

#[test]
fn test_identity_property() {
    // m * I equals m after compaction
    let m = EllpackMatrix::new(
        3,
        3,
        3,
        vec![1.0, 2.0, 0.0, 3.0, 0.0, 0.0, 4.0, 5.0, 6.0],
        vec![0, 2, PAD_INDEX, 1, PAD_INDEX, PAD_INDEX, 0, 1, 2],
    );
    let identity = EllpackMatrix::<f32>::identity(3);

    let c = multiply(&m, &identity, Strategy::Scalar).unwrap();

    assert_eq!(c, compact(&m).unwrap());
}

#[test]
fn test_zero_operand_scenario() {
    let m = EllpackMatrix::new(3, 3, 1, vec![1.0, 2.0, 3.0], vec![0, 1, 2]);
    let empty = EllpackMatrix::<f32>::zeros(3, 3);

    let c = multiply(&m, &empty, Strategy::Scalar).unwrap();
    assert_eq!(c.n_rows, 3);
    assert_eq!(c.n_cols, 3);
    assert_eq!(c.row_capacity, 0);
    for r in 0..3 {
        assert_eq!(c.row_nnz(r), 0);
    }

    // The empty operand annihilates from either side
    let c = multiply(&empty, &m, Strategy::Scalar).unwrap();
    assert_eq!(c.row_capacity, 0);
}

#[test]
fn test_dense_reference_equivalence() {
    // Handwritten 5x5 operands with row capacity 3
    let a = EllpackMatrix::new(
        5,
        5,
        3,
        vec![
            2.0, -1.0, 0.5, 3.0, 0.0, 0.0, 1.0, 4.0, 0.0, -2.5, 1.5, 0.0, 0.0, 0.0, 0.0,
        ],
        vec![
            0,
            2,
            4,
            1,
            PAD_INDEX,
            PAD_INDEX,
            3,
            4,
            PAD_INDEX,
            0,
            2,
            PAD_INDEX,
            PAD_INDEX,
            PAD_INDEX,
            PAD_INDEX,
        ],
    );
    let b = EllpackMatrix::new(
        5,
        5,
        3,
        vec![
            1.0, 2.0, 0.0, -1.0, 3.0, 0.0, 4.0, 0.5, 0.0, 2.0, -3.0, 0.0, 1.0, 0.0, 0.0,
        ],
        vec![
            1,
            3,
            PAD_INDEX,
            0,
            2,
            PAD_INDEX,
            4,
            0,
            PAD_INDEX,
            2,
            3,
            PAD_INDEX,
            1,
            PAD_INDEX,
            PAD_INDEX,
        ],
    );

    let expected = dense_product(&a, &b);

    for strategy in Strategy::all() {
        let c = multiply(&a, &b, strategy).unwrap();
        assert_eq!(c.n_rows, 5);
        assert_eq!(c.n_cols, 5);
        assert_dense_eq(&c, &expected);
    }
}

#[test]
fn test_rectangular_shapes() {
    // 2x3 times 3x4
    let a = EllpackMatrix::new(2, 3, 2, vec![1.0, 2.0, 3.0, 0.0], vec![0, 2, 1, PAD_INDEX]);
    let b = EllpackMatrix::new(
        3,
        4,
        2,
        vec![4.0, 5.0, 6.0, 0.0, 7.0, 8.0],
        vec![0, 3, 2, PAD_INDEX, 1, 3],
    );

    let c = multiply(&a, &b, Strategy::Scalar).unwrap();
    assert_eq!(c.n_rows, 2);
    assert_eq!(c.n_cols, 4);
    assert_dense_eq(&c, &dense_product(&a, &b));
}

#[test]
fn test_dimension_mismatch_is_fatal() {
    let a = EllpackMatrix::<f32>::identity(2);
    let b = EllpackMatrix::<f32>::identity(3);

    for strategy in Strategy::all() {
        assert!(matches!(
            multiply(&a, &b, strategy),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}

#[test]
fn test_zero_product_is_recorded_as_entry() {
    // Row of A hits both rows of B at the same destination column with
    // cancelling products; the zero result must remain a stored entry.
    let a = EllpackMatrix::new(1, 2, 2, vec![1.0, 1.0], vec![0, 1]);
    let b = EllpackMatrix::new(2, 1, 1, vec![5.0, -5.0], vec![0, 0]);

    for strategy in Strategy::all() {
        let c = multiply(&a, &b, strategy).unwrap();
        assert_eq!(c.row_capacity, 1, "{} strategy", strategy);
        assert_eq!(c.row_nnz(0), 1, "{} strategy", strategy);
        let row0: Vec<_> = c.row_entries(0).map(|(col, &v)| (col, v)).collect();
        assert_eq!(row0, vec![(0, 0.0)]);
    }
}

#[test]
fn test_stored_zero_in_a_contributes_nothing() {
    // A carries an explicit zero entry; it is an algebraic no-op and must
    // not mark any destination column as present.
    let a = EllpackMatrix::new(1, 2, 2, vec![0.0, 2.0], vec![0, 1]);
    let b = EllpackMatrix::new(2, 2, 1, vec![3.0, 4.0], vec![0, 1]);

    let c = multiply(&a, &b, Strategy::Scalar).unwrap();

    assert_eq!(c.row_capacity, 1);
    let row0: Vec<_> = c.row_entries(0).map(|(col, &v)| (col, v)).collect();
    assert_eq!(row0, vec![(1, 8.0)]);
}

#[test]
fn test_result_capacity_is_max_row_count() {
    // First output row has 3 entries, second only 1
    let a = EllpackMatrix::new(2, 2, 1, vec![1.0, 1.0], vec![0, 1]);
    let b = EllpackMatrix::new(
        2,
        3,
        3,
        vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0],
        vec![0, 1, 2, 1, PAD_INDEX, PAD_INDEX],
    );

    let c = multiply(&a, &b, Strategy::Scalar).unwrap();

    assert_eq!(c.row_capacity, 3);
    assert_eq!(c.row_nnz(0), 3);
    assert_eq!(c.row_nnz(1), 1);
}
