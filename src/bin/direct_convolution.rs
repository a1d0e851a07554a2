use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use convcheck::{
    benchmark::run_benchmark,
    cli::{parse_or_exit, BenchmarkArgs},
    convolution::convolve_direct,
    logging,
    timed::as_millis_f64,
};

/// Direct (nested loop) convolution over seeded random tensors.
/// Stdout carries the status line and the output values, timing and logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "direct_convolution")]
#[command(version)]
struct Args {
    #[command(flatten)]
    benchmark: BenchmarkArgs,
}

fn main() -> Result<()> {
    logging::init(tracing::Level::INFO);
    let args: Args = parse_or_exit();

    let settings = args.benchmark.settings();
    let run = run_benchmark(&settings, convolve_direct).context("invalid benchmark configuration")?;

    tracing::info!(
        "Convolution (direct) execution time: {:.3} ms",
        as_millis_f64(run.convolution_time)
    );

    let mut stdout = BufWriter::new(io::stdout().lock());
    run.write_report(&mut stdout).context("failed to write results to stdout")?;

    Ok(())
}
