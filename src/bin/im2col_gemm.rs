use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use convcheck::{
    benchmark::run_benchmark,
    cli::{parse_or_exit, BenchmarkArgs},
    convolution::convolve_gemm,
    gemm::GemmKind,
    logging,
    timed::as_millis_f64,
};

/// Im2col + GEMM convolution over the same seeded problem as direct_convolution.
/// Stdout carries the status line and the output values, timing and logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "im2col_gemm")]
#[command(version)]
struct Args {
    #[command(flatten)]
    benchmark: BenchmarkArgs,

    /// Matrix multiply implementation
    #[arg(long, value_enum, default_value_t = GemmKind::Partitioned)]
    gemm: GemmKind,
}

fn main() -> Result<()> {
    logging::init(tracing::Level::INFO);
    let args: Args = parse_or_exit();

    let settings = args.benchmark.settings();
    let gemm = args.gemm;
    let run = run_benchmark(&settings, |input, kernel| convolve_gemm(input, kernel, &gemm))
        .context("invalid benchmark configuration")?;

    tracing::info!(
        "Convolution (im2col + GEMM, {:?}) execution time: {:.3} ms",
        gemm,
        as_millis_f64(run.convolution_time)
    );

    let mut stdout = BufWriter::new(io::stdout().lock());
    run.write_report(&mut stdout).context("failed to write results to stdout")?;

    Ok(())
}
