use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use convcheck::{
    cli::parse_or_exit,
    logging,
    seed::{clock_seed, write_seed, DEFAULT_SEED_FILE},
};

/// Writes a fresh clock-derived seed for the benchmark runs to share.
#[derive(Parser, Debug)]
#[command(name = "seed_generator")]
#[command(version)]
struct Args {
    /// Where to write the seed
    #[arg(short, long, default_value = DEFAULT_SEED_FILE)]
    output: PathBuf,

    /// Write this seed instead of one taken from the clock
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    logging::init(tracing::Level::INFO);
    let args: Args = parse_or_exit();

    let seed = args.seed.unwrap_or_else(clock_seed);
    write_seed(&args.output, seed)
        .with_context(|| format!("failed to write seed to {}", args.output.display()))?;

    tracing::info!(seed, path = %args.output.display(), "wrote seed");
    Ok(())
}
