use std::time::{Duration, Instant};

/// Keeps a trail of checkpoints so phases of a run can be timed separately.
pub struct TimedContext {
    checkpoints: Vec<Instant>
}

impl Default for TimedContext {
    fn default() -> Self { Self::new() }
}

impl TimedContext {
    pub fn new() -> Self {
        let start = Instant::now();
        Self { checkpoints: vec![start] }
    }

    /// Records a new checkpoint and returns the time since the previous one.
    pub fn checkpoint(&mut self) -> Duration {
        let new_checkpoint = Instant::now();
        let last_checkpoint = self.checkpoints.last().copied().unwrap_or(new_checkpoint);
        self.checkpoints.push(new_checkpoint);

        new_checkpoint.duration_since(last_checkpoint)
    }

    /// Time since the context was created.
    pub fn total(&self) -> Duration {
        self.checkpoints[0].elapsed()
    }
}

/// Runs f and returns its result alongside how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();

    (result, start.elapsed())
}

/// Milliseconds as a float, the unit timings are reported in.
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.
}
