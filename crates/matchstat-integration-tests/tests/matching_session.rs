//! Cross-crate tests: a small host simulation drives the statistics engine
//! through its lifecycle the way a matching subsystem would.

use matchstat_core::clock::ManualClock;
use matchstat_core::endpoint::{Endpoint, Position};
use matchstat_core::event::MatchEvent;
use matchstat_core::fixed::{Fixed64, fixed64_to_f64};
use matchstat_core::host::{OutsideClassifier, SeedSource};
use matchstat_core::id::{CategoryId, LocationId};
use matchstat_core::settings::{Format, parse_settings};
use matchstat_core::test_utils::*;
use matchstat_core::timer::JobTimer;
use matchstat_stats::MatchStats;

// ===========================================================================
// A tiny host
// ===========================================================================

const OUTSIDE_BASE: u32 = 10_000;

#[derive(Debug, Clone, Copy)]
struct Offer {
    category: CategoryId,
    endpoint: Endpoint,
    amount: i32,
}

/// Offer queues per category plus the host-side counters the engine seeds
/// from.
struct Host {
    categories: usize,
    incoming: Vec<Vec<Offer>>,
    outgoing: Vec<Vec<Offer>>,
    incoming_amount: Vec<i32>,
    outgoing_amount: Vec<i32>,
    incoming_count: Vec<u16>,
    outgoing_count: Vec<u16>,
}

impl Host {
    fn new(categories: usize) -> Self {
        Self {
            categories,
            incoming: vec![Vec::new(); categories],
            outgoing: vec![Vec::new(); categories],
            incoming_amount: vec![0; categories],
            outgoing_amount: vec![0; categories],
            incoming_count: vec![0; categories],
            outgoing_count: vec![0; categories],
        }
    }

    fn add_incoming(&mut self, stats: &mut MatchStats, offer: Offer) {
        let i = offer.category.index();
        self.incoming_amount[i] += offer.amount;
        self.incoming_count[i] += 1;
        self.incoming[i].push(offer);
        stats.record_add_incoming(offer.category, offer.amount);
    }

    fn add_outgoing(&mut self, stats: &mut MatchStats, offer: Offer) {
        let i = offer.category.index();
        self.outgoing_amount[i] += offer.amount;
        self.outgoing_count[i] += 1;
        self.outgoing[i].push(offer);
        stats.record_add_outgoing(offer.category, offer.amount);
    }

    /// Pair offers first-in-first-out and report each match and the job.
    fn run_matching(&mut self, stats: &mut MatchStats, category: CategoryId) {
        let timer = JobTimer::start();
        let i = category.index();
        while !self.incoming[i].is_empty() && !self.outgoing[i].is_empty() {
            let inc = self.incoming[i].remove(0);
            let out = self.outgoing[i].remove(0);
            let amount = inc.amount.min(out.amount);
            self.incoming_amount[i] -= inc.amount;
            self.outgoing_amount[i] -= out.amount;
            self.incoming_count[i] -= 1;
            self.outgoing_count[i] -= 1;
            stats.record_match(category, &out.endpoint, &inc.endpoint, amount);
        }
        stats.record_job(category, timer.elapsed_ticks());
    }
}

impl SeedSource for Host {
    fn category_count(&self) -> Option<usize> {
        Some(self.categories)
    }
    fn incoming_amounts(&self) -> Option<&[i32]> {
        Some(&self.incoming_amount)
    }
    fn outgoing_amounts(&self) -> Option<&[i32]> {
        Some(&self.outgoing_amount)
    }
    fn incoming_counts(&self) -> Option<&[u16]> {
        Some(&self.incoming_count)
    }
    fn outgoing_counts(&self) -> Option<&[u16]> {
        Some(&self.outgoing_count)
    }
}

struct BoundaryClassifier;

impl OutsideClassifier for BoundaryClassifier {
    fn is_outside_connection(&self, location: LocationId) -> bool {
        location.0 >= OUTSIDE_BASE
    }
}

fn offer(category: CategoryId, x: f32, location: u32, amount: i32) -> Offer {
    Offer {
        category,
        endpoint: Endpoint::new(Position::new(x, 0.0, 0.0), LocationId(location)),
        amount,
    }
}

fn engine(clock: &ManualClock) -> MatchStats {
    let settings = parse_settings("rate_window_ms = 5000\ndistance_scale = 0.001\n", Format::Toml)
        .expect("valid settings");
    MatchStats::new(settings)
        .with_clock(clock.clone())
        .with_classifier(BoundaryClassifier)
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn full_session_keeps_aggregate_consistent() {
    let clock = ManualClock::new(0);
    let mut host = Host::new(5);
    let mut stats = engine(&clock);
    stats.init(&host);

    host.add_incoming(&mut stats, offer(goods(), 0.0, 1, 4));
    host.add_incoming(&mut stats, offer(goods(), 0.0, 2, 2));
    host.add_outgoing(&mut stats, offer(goods(), 1_000.0, 3, 3));
    host.add_outgoing(&mut stats, offer(goods(), 3_000.0, OUTSIDE_BASE, 5));
    host.add_incoming(&mut stats, offer(mail(), 0.0, 4, 1));
    host.add_outgoing(&mut stats, offer(mail(), 2_000.0, 5, 1));

    host.run_matching(&mut stats, goods());
    host.run_matching(&mut stats, mail());

    let goods = stats.counter(goods()).expect("goods counter");
    assert_eq!(goods.total_incoming_count, 2);
    assert_eq!(goods.total_outgoing_count, 2);
    assert_eq!(goods.total_matches, 2);
    assert_eq!(goods.total_match_amount, 3 + 2);
    assert_eq!(goods.total_distance, 4_000.0);
    assert_eq!(goods.total_outside, 1);
    assert_eq!(goods.jobs.count(), 1);

    let all = stats.aggregate().expect("aggregate");
    assert_eq!(all.total_matches, 3);
    assert_eq!(all.total_distance, 6_000.0);
    assert_eq!(all.total_outside, 1);
    assert_eq!(all.jobs.count(), 2);
    assert_eq!(stats.get_total_matches(), 3);
    assert_eq!(stats.get_average_distance(), "2.00");

    let summed: u64 = stats.counters().map(|c| c.total_incoming_count).sum();
    assert_eq!(summed, all.total_incoming_count);
}

#[test]
fn hot_reload_seeds_outstanding_offers() {
    let clock = ManualClock::new(0);
    let mut host = Host::new(5);
    let mut stats = engine(&clock);
    stats.init(&host);

    // Offers queued, nothing matched yet.
    host.add_incoming(&mut stats, offer(garbage(), 0.0, 1, 6));
    host.add_incoming(&mut stats, offer(garbage(), 0.0, 2, 4));
    host.add_outgoing(&mut stats, offer(sick(), 0.0, 3, 1));

    // Simulated reload: the engine goes away and comes back.
    stats.destroy();
    assert!(!stats.is_initialized());
    stats.init(&host);

    let garbage = stats.counter(garbage()).expect("garbage counter");
    assert_eq!(garbage.total_incoming_count, 2);
    assert_eq!(garbage.total_incoming_amount, 10);
    let sick = stats.counter(sick()).expect("sick counter");
    assert_eq!(sick.total_outgoing_count, 1);

    let all = stats.aggregate().expect("aggregate");
    assert_eq!(all.total_incoming_count, 2);
    assert_eq!(all.total_incoming_amount, 10);
    assert_eq!(all.total_outgoing_count, 1);
    assert_eq!(all.total_matches, 0);

    // Re-init with the same host state reproduces the same seed.
    let snapshot = stats.registry().expect("registry").slots().to_vec();
    stats.init(&host);
    assert_eq!(stats.registry().expect("registry").slots(), snapshot.as_slice());
}

#[test]
fn throughput_over_several_windows() {
    let clock = ManualClock::new(0);
    let mut host = Host::new(5);
    let mut stats = engine(&clock);
    stats.init(&host);

    // 20 matches in the first window.
    for n in 0..20 {
        host.add_incoming(&mut stats, offer(crime(), 0.0, n, 1));
        host.add_outgoing(&mut stats, offer(crime(), 10.0, n + 100, 1));
    }
    host.run_matching(&mut stats, crime());
    clock.advance(3_000);
    assert_eq!(stats.get_matches_per_second(), 0.0);

    clock.advance(2_000);
    assert_eq!(stats.get_matches_per_second(), 4.0);

    // 5 more inside the next window are invisible until it closes.
    for n in 0..5 {
        host.add_incoming(&mut stats, offer(crime(), 0.0, n, 1));
        host.add_outgoing(&mut stats, offer(crime(), 10.0, n + 100, 1));
    }
    host.run_matching(&mut stats, crime());
    clock.advance(4_999);
    assert_eq!(stats.get_matches_per_second(), 4.0);

    clock.advance(1);
    assert_eq!(stats.get_matches_per_second(), 1.0);
}

#[test]
fn event_stream_matches_direct_calls() {
    let clock = ManualClock::new(0);
    let host = Host::new(5);

    let mut direct = engine(&clock);
    let mut streamed = engine(&clock);
    direct.init(&host);
    streamed.init(&host);

    let out = Endpoint::new(Position::new(0.0, 0.0, 0.0), LocationId(OUTSIDE_BASE + 1));
    let inc = Endpoint::new(Position::new(0.0, 300.0, 400.0), LocationId(7));

    direct.record_add_outgoing(goods(), 9);
    direct.record_add_incoming(goods(), 9);
    direct.record_match(goods(), &out, &inc, 9);
    direct.record_job(goods(), 120);

    let events = vec![
        MatchEvent::OutgoingAdded {
            category: goods(),
            amount: 9,
        },
        MatchEvent::IncomingAdded {
            category: goods(),
            amount: 9,
        },
        MatchEvent::Matched {
            category: goods(),
            outgoing: out,
            incoming: inc,
            amount: 9,
        },
        MatchEvent::JobCompleted {
            category: goods(),
            elapsed: 120,
        },
    ];
    for event in &events {
        streamed.process_event(event);
    }

    assert_eq!(
        direct.registry().expect("registry").slots(),
        streamed.registry().expect("registry").slots()
    );
    let all = streamed.aggregate().expect("aggregate");
    assert_eq!(all.total_distance, 500.0);
    assert_eq!(all.total_outside, 1);
    assert_eq!(all.jobs.average(), Fixed64::from_num(120));
    assert_eq!(fixed64_to_f64(all.jobs.average()), 120.0);
}

#[test]
fn disabling_mid_session_freezes_counters() {
    let clock = ManualClock::new(0);
    let mut host = Host::new(5);
    let mut stats = engine(&clock);
    stats.init(&host);

    host.add_incoming(&mut stats, offer(goods(), 0.0, 1, 1));
    stats.set_enabled(false);
    host.add_outgoing(&mut stats, offer(goods(), 0.0, 2, 1));
    host.run_matching(&mut stats, goods());
    assert_eq!(stats.get_total_matches(), 0);
    assert!(stats.aggregate().is_none());

    stats.set_enabled(true);
    let goods = stats.counter(goods()).expect("goods counter");
    assert_eq!(goods.total_incoming_count, 1);
    assert_eq!(goods.total_outgoing_count, 0);
    assert_eq!(goods.total_matches, 0);
    assert_eq!(goods.jobs.count(), 0);
}
