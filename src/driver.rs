//! End-to-end driver consumed by the CLI
//!
//! Reads and validates two ELLPACK files, multiplies them with the selected
//! strategy, and writes the serialized result. Benchmark mode repeats the
//! multiply call — a single atomic timed unit — under a monotonic timer and
//! reports the mean elapsed time.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::io::{read_matrix, write_matrix};
use crate::matrix::{validate, EllpackMatrix};
use crate::multiply::{multiply, Strategy};

/// Inputs for one multiplication run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Input file for matrix A
    pub input_a: PathBuf,
    /// Input file for matrix B
    pub input_b: PathBuf,
    /// Output file for the result matrix
    pub output: PathBuf,
    /// Execution strategy for the multiply engine
    pub strategy: Strategy,
    /// Benchmark iterations; `None` runs the multiply once, untimed
    pub benchmark: Option<usize>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Dimensions of the result matrix
    pub n_rows: usize,
    pub n_cols: usize,
    /// Row capacity of the result matrix
    pub row_capacity: usize,
    /// Mean elapsed time per multiply call, when benchmarking
    pub elapsed: Option<Duration>,
}

/// Runs one complete read → validate → multiply → write cycle.
pub fn run(opts: &RunOptions) -> Result<RunSummary> {
    let a = read_validated(&opts.input_a)?;
    let b = read_validated(&opts.input_b)?;

    info!(
        "multiplying {}x{} (capacity {}) by {}x{} (capacity {}) with the {} strategy",
        a.n_rows, a.n_cols, a.row_capacity, b.n_rows, b.n_cols, b.row_capacity, opts.strategy
    );
    if opts.strategy == Strategy::Parallel {
        debug!("{} worker threads available", num_cpus::get());
    }

    let (result, elapsed) = match opts.benchmark {
        None => (multiply(&a, &b, opts.strategy)?, None),
        Some(iterations) => {
            let iterations = iterations.max(1);
            let mut total = Duration::ZERO;

            let start = Instant::now();
            let mut result = multiply(&a, &b, opts.strategy)?;
            total += start.elapsed();
            debug!("iteration 1/{}: {:?}", iterations, total);

            for i in 1..iterations {
                let start = Instant::now();
                result = multiply(&a, &b, opts.strategy)?;
                let elapsed = start.elapsed();
                debug!("iteration {}/{}: {:?}", i + 1, iterations, elapsed);
                total += elapsed;
            }

            (result, Some(total / iterations as u32))
        }
    };

    write_matrix(&opts.output, &result)?;

    Ok(RunSummary {
        n_rows: result.n_rows,
        n_cols: result.n_cols,
        row_capacity: result.row_capacity,
        elapsed,
    })
}

fn read_validated(path: &PathBuf) -> Result<EllpackMatrix<f32>> {
    let matrix = read_matrix(path)?;
    validate(&matrix).map_err(|source| Error::Validation {
        path: path.clone(),
        source,
    })?;
    Ok(matrix)
}
