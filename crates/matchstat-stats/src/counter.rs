//! Per-category accumulators.

use matchstat_core::fixed::{Fixed64, Ticks, mean_ticks};
use matchstat_core::id::CounterSlot;

// ---------------------------------------------------------------------------
// Job timing
// ---------------------------------------------------------------------------

/// Running statistics over matching-job durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobStats {
    count: u64,
    total: Ticks,
    min: Option<Ticks>,
    max: Option<Ticks>,
}

impl JobStats {
    /// Fold one job duration into the running statistics.
    pub fn record(&mut self, elapsed: Ticks) {
        self.count += 1;
        self.total = self.total.saturating_add(elapsed);
        self.min = Some(self.min.map_or(elapsed, |m| m.min(elapsed)));
        self.max = Some(self.max.map_or(elapsed, |m| m.max(elapsed)));
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total(&self) -> Ticks {
        self.total
    }

    /// Shortest job seen, 0 if none.
    pub fn min(&self) -> Ticks {
        self.min.unwrap_or(0)
    }

    /// Longest job seen, 0 if none.
    pub fn max(&self) -> Ticks {
        self.max.unwrap_or(0)
    }

    /// Mean job duration in ticks.
    pub fn average(&self) -> Fixed64 {
        mean_ticks(self.total, self.count)
    }
}

// ---------------------------------------------------------------------------
// Category counter
// ---------------------------------------------------------------------------

/// All accumulated metrics for one category, or for the aggregate slot.
///
/// Amounts are summed in `i64` so long sessions of `i32` offer amounts cannot
/// overflow. Distance is kept in raw host units.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounter {
    pub slot: CounterSlot,
    pub total_incoming_count: u64,
    pub total_incoming_amount: i64,
    pub total_outgoing_count: u64,
    pub total_outgoing_amount: i64,
    pub total_matches: u64,
    pub total_match_amount: i64,
    pub total_distance: f64,
    pub total_outside: u64,
    pub jobs: JobStats,
}

impl CategoryCounter {
    /// A zeroed counter for `slot`.
    pub fn new(slot: CounterSlot) -> Self {
        Self {
            slot,
            total_incoming_count: 0,
            total_incoming_amount: 0,
            total_outgoing_count: 0,
            total_outgoing_amount: 0,
            total_matches: 0,
            total_match_amount: 0,
            total_distance: 0.0,
            total_outside: 0,
            jobs: JobStats::default(),
        }
    }

    pub(crate) fn add_match(&mut self, amount: i32, distance: f64, outside: bool) {
        self.total_matches += 1;
        self.total_match_amount += i64::from(amount);
        self.total_distance += distance;
        if outside {
            self.total_outside += 1;
        }
    }

    pub(crate) fn add_job(&mut self, elapsed: Ticks) {
        self.jobs.record(elapsed);
    }

    pub(crate) fn add_incoming(&mut self, count: u64, amount: i64) {
        self.total_incoming_count += count;
        self.total_incoming_amount += amount;
    }

    pub(crate) fn add_outgoing(&mut self, count: u64, amount: i64) {
        self.total_outgoing_count += count;
        self.total_outgoing_amount += amount;
    }

    /// Mean raw distance per match, 0.0 with no matches.
    pub fn average_distance(&self) -> f64 {
        if self.total_matches == 0 {
            return 0.0;
        }
        self.total_distance / self.total_matches as f64
    }

    /// Mean matched amount per match, 0.0 with no matches.
    pub fn average_match_amount(&self) -> f64 {
        if self.total_matches == 0 {
            return 0.0;
        }
        self.total_match_amount as f64 / self.total_matches as f64
    }

    /// Fraction of matches touching an outside connection (0.0 to 1.0).
    pub fn outside_ratio(&self) -> f64 {
        if self.total_matches == 0 {
            return 0.0;
        }
        self.total_outside as f64 / self.total_matches as f64
    }

    /// True when nothing has been recorded or seeded.
    pub fn is_empty(&self) -> bool {
        *self == CategoryCounter::new(self.slot)
    }
}
