use std::{ops::RangeInclusive, path::PathBuf};

use clap::{Args, Parser};

use crate::{
    benchmark::BenchmarkSettings,
    config::{KernelFitPolicy, ShapeRanges, DEFAULT_COMMON_SIZES},
    seed::{read_seed, DEFAULT_SEED_FILE},
};

/// Parses `LOW..=HIGH`, or a single number meaning exactly that value.
pub fn parse_range(text: &str) -> Result<RangeInclusive<usize>, String> {
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("`{part}` is not a non-negative integer: {err}"))
    };

    match text.split_once("..=") {
        Some((low, high)) => Ok(parse(low)?..=parse(high)?),
        None => {
            let value = parse(text)?;
            Ok(value..=value)
        }
    }
}

/// Exit code for a failed parse: help and version requests are not failures, anything else exits 1.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Parses the process arguments, printing any clap message and exiting with parse_exit_code on failure.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(parse_exit_code(&err));
        }
    }
}

/// Options shared by the benchmark binaries.
#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    /// File holding the shared random seed, a missing file means seed 0
    #[arg(long, default_value = DEFAULT_SEED_FILE)]
    pub seed_file: PathBuf,

    /// Use this seed instead of reading the seed file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sizes batch size and input channels are drawn from
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_COMMON_SIZES)]
    pub common_sizes: Vec<usize>,

    /// Range of output channel counts
    #[arg(long, value_parser = parse_range, default_value = "1..=8")]
    pub out_channels: RangeInclusive<usize>,

    /// Range of input heights and widths
    #[arg(long, value_parser = parse_range, default_value = "8..=64")]
    pub spatial: RangeInclusive<usize>,

    /// Range of kernel heights and widths
    #[arg(long, value_parser = parse_range, default_value = "2..=5")]
    pub kernel: RangeInclusive<usize>,

    /// What to do when the kernel is larger than the input
    #[arg(long, value_enum, default_value_t = KernelFitPolicy::Clamp)]
    pub kernel_fit: KernelFitPolicy,
}

impl BenchmarkArgs {
    /// Resolves the seed (reading the seed file if needed) and builds the run settings.
    pub fn settings(&self) -> BenchmarkSettings {
        let seed = self.seed.unwrap_or_else(|| read_seed(&self.seed_file));

        BenchmarkSettings {
            seed,
            ranges: ShapeRanges {
                common_sizes: self.common_sizes.clone(),
                out_channels: self.out_channels.clone(),
                spatial: self.spatial.clone(),
                kernel: self.kernel.clone(),
            },
            policy: self.kernel_fit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        benchmark: BenchmarkArgs,
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("2..=5"), Ok(2..=5));
        assert_eq!(parse_range(" 3 ..= 4"), Ok(3..=4));
        assert_eq!(parse_range("7"), Ok(7..=7));
        assert!(parse_range("a..=4").is_err());
        assert!(parse_range("-1").is_err());
    }

    #[test]
    fn test_defaults_match_shape_ranges() {
        let cli = TestCli::parse_from(["bench", "--seed", "9"]);
        let settings = cli.benchmark.settings();

        assert_eq!(settings.seed, 9);
        assert_eq!(settings.ranges, ShapeRanges::default());
        assert_eq!(settings.policy, KernelFitPolicy::Clamp);
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "bench",
            "--seed", "1",
            "--common-sizes", "1,2",
            "--spatial", "3..=4",
            "--kernel", "5",
            "--kernel-fit", "reject",
        ]);
        let settings = cli.benchmark.settings();

        assert_eq!(settings.ranges.common_sizes, vec![1, 2]);
        assert_eq!(settings.ranges.spatial, 3..=4);
        assert_eq!(settings.ranges.kernel, 5..=5);
        assert_eq!(settings.policy, KernelFitPolicy::Reject);
    }

    #[test]
    fn test_bad_arguments_exit_one() {
        let err = TestCli::try_parse_from(["bench", "--bogus"]).err().unwrap();
        assert_eq!(parse_exit_code(&err), 1);

        let err = TestCli::try_parse_from(["bench", "--spatial", "x"]).err().unwrap();
        assert_eq!(parse_exit_code(&err), 1);
    }

    #[test]
    fn test_help_exits_zero() {
        let err = TestCli::try_parse_from(["bench", "--help"]).err().unwrap();
        assert_eq!(parse_exit_code(&err), 0);
    }

    #[test]
    fn test_seed_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");
        std::fs::write(&path, "77").unwrap();

        let cli = TestCli::parse_from(["bench", "--seed-file", path.to_str().unwrap()]);
        assert_eq!(cli.benchmark.settings().seed, 77);
    }
}
