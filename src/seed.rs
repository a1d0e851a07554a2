use std::{
    fs,
    io,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, warn};

/// Where the benchmark runs look for the shared seed unless told otherwise.
pub const DEFAULT_SEED_FILE: &str = "random_seed.txt";

/// Reads the shared seed from a file holding a single decimal integer.
/// A missing, unreadable or malformed file yields 0 so a run is still reproducible.
pub fn read_seed(path: &Path) -> u64 {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read seed file, using seed 0");
            return 0;
        }
    };

    match contents.split_whitespace().next().map(str::parse::<u64>) {
        Some(Ok(seed)) => {
            debug!(seed, path = %path.display(), "read seed");
            seed
        }
        _ => {
            warn!(path = %path.display(), "seed file does not start with an unsigned integer, using seed 0");
            0
        }
    }
}

/// Overwrites path with seed as decimal text.
pub fn write_seed(path: &Path, seed: u64) -> io::Result<()> {
    fs::write(path, seed.to_string())
}

/// Seed derived from the high resolution clock, nanoseconds since the epoch truncated to 64 bits.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");

        write_seed(&path, 1_234_567_890_123).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1234567890123");
        assert_eq!(read_seed(&path), 1_234_567_890_123);
    }

    #[test]
    fn test_missing_file_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_seed(&dir.path().join("nope.txt")), 0);
    }

    #[test]
    fn test_garbage_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");

        fs::write(&path, "not a number").unwrap();
        assert_eq!(read_seed(&path), 0);

        fs::write(&path, "-5").unwrap();
        assert_eq!(read_seed(&path), 0);
    }

    #[test]
    fn test_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");

        fs::write(&path, "  42\n trailing").unwrap();
        assert_eq!(read_seed(&path), 42);
    }

    #[test]
    fn test_clock_seed_moves() {
        assert_ne!(clock_seed(), 0);
    }
}
