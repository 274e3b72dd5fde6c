//! Timing for matching jobs.

use std::time::{Duration, Instant};

use crate::fixed::Ticks;

/// Measures one matching job. Start it before the job runs and read
/// [`elapsed_ticks`](Self::elapsed_ticks) when it finishes.
#[derive(Debug, Clone, Copy)]
pub struct JobTimer {
    started: Instant,
}

impl JobTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed time in microsecond ticks.
    pub fn elapsed_ticks(&self) -> Ticks {
        duration_to_ticks(self.elapsed())
    }
}

/// Convert a duration to microsecond ticks, saturating.
pub fn duration_to_ticks(duration: Duration) -> Ticks {
    u64::try_from(duration.as_micros()).unwrap_or(Ticks::MAX)
}
