use std::{
    io::{self, Write},
    time::Duration,
};

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    config::{ConvolutionConfig, KernelFitPolicy, ShapeRanges},
    error::ConfigError,
    flat_serializer::write_flat_line,
    geoalg::f64_math::tensor::{Kernel, Tensor},
    timed::{as_millis_f64, TimedContext},
};

/// Everything that decides what a run computes, apart from the algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSettings {
    pub seed: u64,
    pub ranges: ShapeRanges,
    pub policy: KernelFitPolicy,
}

impl BenchmarkSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ranges: ShapeRanges::default(),
            policy: KernelFitPolicy::default(),
        }
    }
}

/// Result of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub config: ConvolutionConfig,
    pub output: Tensor,
    pub generation_time: Duration,
    pub convolution_time: Duration,
}

impl BenchmarkRun {
    /// Writes the status line followed by the output values, the format the comparator reads.
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.config)?;
        write_flat_line(writer, &self.output.values)
    }
}

/// Generates the input and kernel every algorithm is fed for a given seed.
/// Random draws happen in a fixed order: shape parameters, then input values, then kernel values.
pub fn generate_problem(settings: &BenchmarkSettings) -> Result<(ConvolutionConfig, Tensor, Kernel), ConfigError> {
    let mut rng = StdRng::seed_from_u64(settings.seed);

    let config = ConvolutionConfig::random(&settings.ranges, &mut rng)?.fit_kernel(settings.policy)?;
    let input = Tensor::new_randomized(config.input_shape(), &mut rng);
    let kernel = Tensor::new_randomized(config.kernel_shape(), &mut rng);

    Ok((config, input, kernel))
}

/// Generates the problem for settings and times convolve on it.
pub fn run_benchmark<F>(settings: &BenchmarkSettings, convolve: F) -> Result<BenchmarkRun, ConfigError>
where
    F: FnOnce(&Tensor, &Kernel) -> Tensor,
{
    let mut context = TimedContext::new();

    let (config, input, kernel) = generate_problem(settings)?;
    let generation_time = context.checkpoint();
    info!(seed = settings.seed, %config, "generated tensors");

    let output = convolve(&input, &kernel);
    let convolution_time = context.checkpoint();
    assert_eq!(output.shape, config.output_shape(), "Convolution produced the wrong output shape.");

    info!(
        generation_ms = as_millis_f64(generation_time),
        convolution_ms = as_millis_f64(convolution_time),
        "run complete"
    );

    Ok(BenchmarkRun {
        config,
        output,
        generation_time,
        convolution_time,
    })
}
