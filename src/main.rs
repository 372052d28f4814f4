//! Thin CLI around the ellgemm driver
//!
//! ```text
//! ellgemm -a inputA -b inputB -o output [-V strategy] [-B [iterations]]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ellgemm::driver::{run, RunOptions};
use ellgemm::Strategy;

/// Multiply two sparse matrices stored in the ELLPACK text format.
#[derive(Parser)]
#[command(name = "ellgemm")]
struct Cli {
    /// Input file for matrix A
    #[arg(short = 'a', long)]
    input_a: PathBuf,

    /// Input file for matrix B
    #[arg(short = 'b', long)]
    input_b: PathBuf,

    /// Output file for the result matrix
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Multiplication strategy: scalar (0), vectorized (1), prefetch (2)
    /// or parallel (3)
    #[arg(short = 'V', long = "strategy", default_value = "scalar")]
    strategy: Strategy,

    /// Benchmark the multiply call over N iterations and report the mean
    /// elapsed seconds
    #[arg(
        short = 'B',
        long = "benchmark",
        num_args = 0..=1,
        default_missing_value = "3",
        value_name = "N"
    )]
    benchmark: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let opts = RunOptions {
        input_a: cli.input_a,
        input_b: cli.input_b,
        output: cli.output,
        strategy: cli.strategy,
        benchmark: cli.benchmark,
    };

    match run(&opts) {
        Ok(summary) => {
            if let Some(elapsed) = summary.elapsed {
                println!("Execution time: {:.6} seconds", elapsed.as_secs_f64());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ellgemm: {}", err);
            err.exit_code()
        }
    }
}
