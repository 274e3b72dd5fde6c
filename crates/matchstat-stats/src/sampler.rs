//! Windowed throughput sampling.

/// Derives matches-per-second from the aggregate match count.
///
/// The rate is a step function: it is recomputed at most once per window,
/// lazily, when [`sample`](Self::sample) is called at least `window_ms` after
/// the previous resample. Calls inside the window return the stored rate.
#[derive(Debug, Clone)]
pub struct RateSampler {
    window_ms: u64,
    /// Clock reading and match count at the last resample. `None` until
    /// started.
    last: Option<(u64, u64)>,
    rate: f32,
}

impl RateSampler {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: None,
            rate: 0.0,
        }
    }

    /// Begin a fresh sampling baseline at `now_ms` with `matches` already
    /// counted. The last computed rate is kept until the next resample.
    pub fn start(&mut self, now_ms: u64, matches: u64) {
        self.last = Some((now_ms, matches));
    }

    /// Stop sampling. [`sample`](Self::sample) keeps returning the last rate.
    pub fn stop(&mut self) {
        self.last = None;
    }

    pub fn is_started(&self) -> bool {
        self.last.is_some()
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn set_window_ms(&mut self, window_ms: u64) {
        self.window_ms = window_ms;
    }

    /// Last computed rate without resampling.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Resample if a full window has elapsed since the last resample, then
    /// return the current rate.
    pub fn sample(&mut self, now_ms: u64, matches: u64) -> f32 {
        let Some((last_ms, last_matches)) = self.last else {
            return self.rate;
        };
        let elapsed_ms = now_ms.saturating_sub(last_ms);
        if elapsed_ms >= self.window_ms && elapsed_ms > 0 {
            let delta = matches as f64 - last_matches as f64;
            self.rate = (delta / (elapsed_ms as f64 / 1000.0)) as f32;
            self.last = Some((now_ms, matches));
            tracing::trace!(elapsed_ms, delta, rate = self.rate, "resampled match rate");
        }
        self.rate
    }
}
