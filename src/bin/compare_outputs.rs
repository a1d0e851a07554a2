use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use convcheck::{
    cli::parse_or_exit,
    comparator::{Comparator, Comparison, DEFAULT_TOLERANCE},
    logging,
    prettify::{styled, BOLD, BRIGHT_GREEN, BRIGHT_RED, BRIGHT_YELLOW},
};

/// Compares two convolution result files token by token with a relative tolerance.
/// Exits 0 when the files agree, 1 on any mismatch, bad arguments or unreadable files.
#[derive(Parser, Debug)]
#[command(name = "compare_outputs")]
#[command(version)]
struct Args {
    /// First result file
    file1: PathBuf,

    /// Second result file
    file2: PathBuf,

    /// Relative tolerance for numeric tokens
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn run(args: &Args) -> Result<Comparison> {
    anyhow::ensure!(args.tolerance >= 0., "tolerance must not be negative, got {}", args.tolerance);

    let comparator = Comparator::new(args.tolerance);
    let comparison = comparator
        .compare(open(&args.file1)?, open(&args.file2)?)
        .context("failed while reading result files")?;

    Ok(comparison)
}

fn main() -> ExitCode {
    logging::init(tracing::Level::WARN);

    let args: Args = parse_or_exit();

    match run(&args) {
        Ok(Comparison::Match { lines }) => {
            println!("{} ({lines} lines)", styled(BRIGHT_GREEN, "Files match."));
            ExitCode::SUCCESS
        }
        Ok(Comparison::Mismatch(mismatch)) => {
            eprintln!("{} {mismatch}", styled(&format!("{BOLD}{BRIGHT_RED}"), "Mismatch:"));
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{} {err:#}", styled(BRIGHT_YELLOW, "Error:"));
            ExitCode::FAILURE
        }
    }
}
