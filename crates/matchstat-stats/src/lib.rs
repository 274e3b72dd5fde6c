//! Match statistics engine for resource-matching subsystems.
//!
//! Tracks, per category and in aggregate, how many offers were registered,
//! how many were matched, how much material moved, how far matches travelled,
//! and how long matching jobs took. A windowed sampler turns the aggregate
//! match count into a smoothed matches-per-second figure.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = MatchStats::new(StatsSettings::default())
//!     .with_classifier(|loc: LocationId| host.is_outside(loc));
//! stats.init(&host);
//! // From the matching logic:
//! stats.record_add_incoming(category, amount);
//! stats.record_match(category, &outgoing, &incoming, amount);
//! stats.record_job(category, timer.elapsed_ticks());
//! // From display code:
//! let rate = stats.get_matches_per_second();
//! let avg = stats.get_average_distance();
//! ```
//!
//! Every recorder call is a silent no-op while the engine is uninitialized
//! or statistics are disabled. Nothing here returns an error.

pub mod counter;
pub mod registry;
pub mod sampler;

use matchstat_core::clock::{Clock, Stopwatch};
use matchstat_core::endpoint::Endpoint;
use matchstat_core::event::MatchEvent;
use matchstat_core::fixed::Ticks;
use matchstat_core::host::{NeverOutside, OutsideClassifier, SeedSource};
use matchstat_core::id::{CategoryId, MAX_CATEGORY_COUNT};
use matchstat_core::settings::StatsSettings;

pub use counter::{CategoryCounter, JobStats};
pub use registry::CounterRegistry;
pub use sampler::RateSampler;

// ---------------------------------------------------------------------------
// MatchStats: main engine struct
// ---------------------------------------------------------------------------

/// The statistics engine.
///
/// Owned by the host and handed to the matching and display code by
/// reference. Between [`init`](Self::init) and [`destroy`](Self::destroy) it
/// holds a [`CounterRegistry`]; outside that window every query returns its
/// zero default.
pub struct MatchStats {
    settings: StatsSettings,
    registry: Option<CounterRegistry>,
    sampler: RateSampler,
    clock: Box<dyn Clock>,
    classifier: Box<dyn OutsideClassifier>,
}

impl std::fmt::Debug for MatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchStats")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("sampler", &self.sampler)
            .finish_non_exhaustive()
    }
}

impl MatchStats {
    /// Create an uninitialized engine using a wall-clock [`Stopwatch`] and a
    /// classifier that reports no outside connections.
    ///
    /// `settings` must pass [`StatsSettings::validate`]; the loaders in
    /// [`matchstat_core::settings`] already check this.
    pub fn new(settings: StatsSettings) -> Self {
        debug_assert!(
            settings.validate().is_ok(),
            "MatchStats::new given invalid settings: {settings:?}"
        );
        let sampler = RateSampler::new(settings.rate_window_ms);
        Self {
            settings,
            registry: None,
            sampler,
            clock: Box::new(Stopwatch::start()),
            classifier: Box::new(NeverOutside),
        }
    }

    /// Replace the time source used for rate sampling.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the outside-connection classifier.
    pub fn with_classifier(mut self, classifier: impl OutsideClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn settings(&self) -> &StatsSettings {
        &self.settings
    }

    /// Toggle recording. Counters keep their values while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.statistics_enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.statistics_enabled
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Create or reset the counter registry and seed it from `host`.
    ///
    /// Sizing uses the host's category count, or
    /// [`fallback_category_count`](StatsSettings::fallback_category_count)
    /// when the host reports none, capped at [`MAX_CATEGORY_COUNT`]. Runs
    /// regardless of the enabled flag.
    pub fn init(&mut self, host: &dyn SeedSource) {
        let reported = match host.category_count() {
            Some(n) if n > 0 => n,
            _ => self.settings.fallback_category_count,
        };
        let category_count = reported.min(MAX_CATEGORY_COUNT);
        if category_count < reported {
            tracing::warn!(
                reported,
                max = MAX_CATEGORY_COUNT,
                "category count exceeds the addressable range, clamping"
            );
        }

        let registry = self
            .registry
            .get_or_insert_with(|| CounterRegistry::new(category_count));
        registry.reset(category_count);

        let seeded = host.outstanding_offers().map(|offers| registry.seed(&offers));

        self.sampler.set_window_ms(self.settings.rate_window_ms);
        self.sampler
            .start(self.clock.now_ms(), registry.aggregate().total_matches);

        tracing::debug!(
            category_count,
            seeded_categories = ?seeded,
            rate_window_ms = self.sampler.window_ms(),
            "match statistics initialized"
        );
    }

    /// Discard all counters. The last computed rate survives.
    pub fn destroy(&mut self) {
        if self.registry.take().is_some() {
            tracing::debug!("match statistics destroyed");
        }
        self.sampler.stop();
    }

    // -- Recording ----------------------------------------------------------

    fn recording(&mut self) -> Option<&mut CounterRegistry> {
        if !self.settings.statistics_enabled {
            return None;
        }
        self.registry.as_mut()
    }

    /// Record a completed match between an outgoing and an incoming offer.
    pub fn record_match(
        &mut self,
        category: CategoryId,
        outgoing: &Endpoint,
        incoming: &Endpoint,
        amount: i32,
    ) {
        if !self.settings.statistics_enabled {
            return;
        }
        let classifier = &self.classifier;
        if let Some(registry) = self.registry.as_mut() {
            let distance = outgoing.distance_to(incoming);
            let outside = classifier.is_outside_connection(outgoing.location)
                || classifier.is_outside_connection(incoming.location);
            registry.apply(category, |c| c.add_match(amount, distance, outside));
        }
    }

    /// Record the duration of one matching job.
    pub fn record_job(&mut self, category: CategoryId, elapsed: Ticks) {
        if let Some(registry) = self.recording() {
            registry.apply(category, |c| c.add_job(elapsed));
        }
    }

    /// Record a newly registered incoming offer.
    pub fn record_add_incoming(&mut self, category: CategoryId, amount: i32) {
        if let Some(registry) = self.recording() {
            registry.apply(category, |c| c.add_incoming(1, i64::from(amount)));
        }
    }

    /// Record a newly registered outgoing offer.
    pub fn record_add_outgoing(&mut self, category: CategoryId, amount: i32) {
        if let Some(registry) = self.recording() {
            registry.apply(category, |c| c.add_outgoing(1, i64::from(amount)));
        }
    }

    /// Dispatch a [`MatchEvent`] to the matching recorder method.
    pub fn process_event(&mut self, event: &MatchEvent) {
        tracing::trace!(category = event.category().0, ?event, "match event");
        match event {
            MatchEvent::Matched {
                category,
                outgoing,
                incoming,
                amount,
            } => self.record_match(*category, outgoing, incoming, *amount),
            MatchEvent::JobCompleted { category, elapsed } => {
                self.record_job(*category, *elapsed)
            }
            MatchEvent::IncomingAdded { category, amount } => {
                self.record_add_incoming(*category, *amount)
            }
            MatchEvent::OutgoingAdded { category, amount } => {
                self.record_add_outgoing(*category, *amount)
            }
        }
    }

    // -- Rate ---------------------------------------------------------------

    /// Smoothed matches per second, recomputed at most once per window.
    ///
    /// Returns the last known rate (0.0 if never computed) while
    /// uninitialized or disabled.
    pub fn get_matches_per_second(&mut self) -> f32 {
        if !self.settings.statistics_enabled || !self.sampler.is_started() {
            return self.sampler.rate();
        }
        match &self.registry {
            Some(registry) => {
                let matches = registry.aggregate().total_matches;
                self.sampler.sample(self.clock.now_ms(), matches)
            }
            None => self.sampler.rate(),
        }
    }

    // -- Queries ------------------------------------------------------------

    fn reading(&self) -> Option<&CounterRegistry> {
        if !self.settings.statistics_enabled {
            return None;
        }
        self.registry.as_ref()
    }

    /// Aggregate match count, 0 when uninitialized or disabled.
    pub fn get_total_matches(&self) -> u64 {
        self.reading()
            .map(|r| r.aggregate().total_matches)
            .unwrap_or(0)
    }

    /// Mean match distance in display units with two decimals, or `"0"` when
    /// there is nothing to average. Halves round away from zero.
    pub fn get_average_distance(&self) -> String {
        match self.reading().map(CounterRegistry::aggregate) {
            Some(all) if all.total_matches > 0 => {
                let scaled = all.average_distance() * self.settings.distance_scale;
                format!("{:.2}", (scaled * 100.0).round() / 100.0)
            }
            _ => "0".to_string(),
        }
    }

    /// Number of real categories, 0 when uninitialized.
    pub fn category_count(&self) -> usize {
        self.registry
            .as_ref()
            .map(CounterRegistry::category_count)
            .unwrap_or(0)
    }

    /// Counter for one category.
    pub fn counter(&self, category: CategoryId) -> Option<&CategoryCounter> {
        self.reading().and_then(|r| r.get(category))
    }

    /// The aggregate counter.
    pub fn aggregate(&self) -> Option<&CategoryCounter> {
        self.reading().map(CounterRegistry::aggregate)
    }

    /// Category counters in ordinal order. Empty when uninitialized or
    /// disabled.
    pub fn counters(&self) -> impl Iterator<Item = &CategoryCounter> {
        self.reading().into_iter().flat_map(|r| r.categories())
    }

    /// The whole registry, for hosts that render their own tables.
    pub fn registry(&self) -> Option<&CounterRegistry> {
        self.reading()
    }
}
