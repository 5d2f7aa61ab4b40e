//! # cortex-heartbeat
//!
//! The 1 Hz master clock (C5, §4.5) and the named rhythm registry it is
//! itself one entry of (C7, §4.7, re-exported from `cortex-rhythms`).
//! Collects a [`BrainSnapshot`] every tick, runs the circuit breaker,
//! applies metacognitive feedback to the AwakeEngine, drives one market
//! auction, and fans the snapshot out to listeners.

mod circuit_breaker;
mod health;

pub use circuit_breaker::CircuitBreaker;
pub use health::{HealthReport, TimeSeriesPoint};
pub use cortex_rhythms::{run_rhythm, RhythmRegistry, RhythmState};

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use cortex_core::models::BrainSnapshot;
use cortex_core::traits::{AwakeControl, BiddingAgent, StatusProvider};
use cortex_market::Market;

const RING_CAPACITY: usize = 300;
const LOW_CONSISTENCY_THRESHOLD: u32 = 5;
const ERROR_RATE_THRESHOLD: f64 = 2.0;
const QUEUE_LENGTH_THRESHOLD: usize = 10;

struct Inner {
    history: VecDeque<BrainSnapshot>,
    breaker: CircuitBreaker,
    last_tick_at: Option<DateTime<Utc>>,
}

/// Owns the snapshot ring buffer, the market, and the registered
/// components/bidders. Tick-safe: a single call to [`Heartbeat::tick`]
/// must not be interleaved with another — callers run it from one loop.
pub struct Heartbeat {
    components: Vec<Arc<dyn StatusProvider>>,
    bidders: Vec<Arc<dyn BiddingAgent>>,
    market: Arc<RwLock<Market>>,
    awake: Arc<dyn AwakeControl>,
    listeners: Vec<Arc<dyn Fn(&BrainSnapshot) + Send + Sync>>,
    inner: RwLock<Inner>,
}

impl Heartbeat {
    pub fn new(market: Arc<RwLock<Market>>, awake: Arc<dyn AwakeControl>) -> Self {
        Self {
            components: Vec::new(),
            bidders: Vec::new(),
            market,
            awake,
            listeners: Vec::new(),
            inner: RwLock::new(Inner {
                history: VecDeque::with_capacity(RING_CAPACITY),
                breaker: CircuitBreaker::new(),
                last_tick_at: None,
            }),
        }
    }

    pub fn register_component(&mut self, component: Arc<dyn StatusProvider>) {
        self.components.push(component);
    }

    pub fn register_bidder(&mut self, bidder: Arc<dyn BiddingAgent>) {
        self.bidders.push(bidder);
    }

    pub fn add_listener(&mut self, listener: Arc<dyn Fn(&BrainSnapshot) + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// One tick of the protocol, in the ordering guarantee's fixed order:
    /// collect → store → breaker → metacognition → auction → listeners.
    #[tracing::instrument(skip(self))]
    pub fn tick(&self, dt_seconds: f64) -> BrainSnapshot {
        // 1. Collect.
        let statuses: Vec<_> = self.components.iter().map(|c| c.get_status()).collect();
        let mut snapshot = BrainSnapshot::new(statuses);

        let mut inner = self.inner.write();

        // 3. Circuit breaker (evaluated against the snapshot just collected,
        // before it is stored, so a halted snapshot records its own cause).
        let total_errors = snapshot.total_errors();
        if inner.breaker.record(total_errors) {
            self.awake.stop();
        }
        if inner.breaker.halted() {
            snapshot = snapshot.halt(inner.breaker.halt_reason().unwrap_or("unknown").to_string());
        }

        // 2. Store.
        inner.history.push_back(snapshot.clone());
        if inner.history.len() > RING_CAPACITY {
            inner.history.pop_front();
        }
        inner.last_tick_at = Some(snapshot.taken_at);
        drop(inner);

        // 4. Metacognitive feedback.
        if !snapshot.halted {
            if self.awake.low_consistency_count() > LOW_CONSISTENCY_THRESHOLD && self.awake.is_idle() {
                self.awake.request_focused_burst();
            }
            if self.awake.error_rate() > ERROR_RATE_THRESHOLD {
                self.awake.scale_hz(0.5);
            }
            if self.awake.queue_len() > QUEUE_LENGTH_THRESHOLD {
                self.awake.scale_hz(1.5);
            }

            // 5. Market tick.
            let mut bids = Vec::new();
            let mut grants = Vec::new();
            for bidder in &self.bidders {
                let (mut bidder_bids, mut bidder_grants) = bidder.construct_bid();
                bids.append(&mut bidder_bids);
                grants.append(&mut bidder_grants);
            }
            {
                let mut market = self.market.write();
                for grant in grants {
                    market.submit_grant(grant);
                }
                let result = market.tick(&bids, dt_seconds);
                for bidder in &self.bidders {
                    let mine: Vec<_> = result
                        .allocations
                        .iter()
                        .filter(|a| a.winner == bidder.agent_id())
                        .cloned()
                        .collect();
                    if !mine.is_empty() {
                        bidder.receive_allocation(&mine);
                    }
                }
                self.awake.observe_energy(result.energy_level);
            }
        }

        // 6. Notify listeners.
        for listener in &self.listeners {
            listener(&snapshot);
        }

        snapshot
    }

    /// Run the 1 Hz loop until `running` returns false. Each iteration
    /// sleeps `max(0, 1.0 - elapsed)` so the *period*, not just the sleep,
    /// targets 1 Hz.
    pub async fn run(self: Arc<Self>, mut running: impl FnMut() -> bool) {
        while running() {
            let start = Instant::now();
            self.tick(1.0);
            let elapsed = start.elapsed();
            let target = Duration::from_secs(1);
            if elapsed < target {
                tokio::time::sleep(target - elapsed).await;
            }
        }
    }

    pub fn get_current(&self) -> Option<BrainSnapshot> {
        self.inner.read().history.back().cloned()
    }

    pub fn get_history(&self, last_n: usize) -> Vec<BrainSnapshot> {
        let inner = self.inner.read();
        inner
            .history
            .iter()
            .rev()
            .take(last_n)
            .rev()
            .cloned()
            .collect()
    }

    pub fn get_time_series(&self, component: &str, metric: &str, last_n: usize) -> Vec<TimeSeriesPoint> {
        self.get_history(last_n)
            .into_iter()
            .filter_map(|snap| {
                let value = snap.metric(component, metric)?;
                Some(TimeSeriesPoint {
                    at: snap.taken_at,
                    value,
                })
            })
            .collect()
    }

    pub fn get_health(&self) -> HealthReport {
        let inner = self.inner.read();
        HealthReport {
            halted: inner.breaker.halted(),
            halt_reason: inner.breaker.halt_reason().map(String::from),
            last_tick_at: inner.last_tick_at,
            history_len: inner.history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::config::MarketConfig;
    use cortex_core::models::{Allocation, Bid, ComponentStatus, GrantRequest};
    use cortex_market::SeekingDrive;
    use parking_lot::Mutex as PLMutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    struct FixedStatus(&'static str, u32);
    impl StatusProvider for FixedStatus {
        fn get_status(&self) -> ComponentStatus {
            ComponentStatus::new(self.0).with_metric("errors", self.1 as f64)
        }
    }

    struct NullAwake {
        stopped: AtomicBool,
        bursts: AtomicU32,
    }
    impl AwakeControl for NullAwake {
        fn is_idle(&self) -> bool {
            true
        }
        fn queue_len(&self) -> usize {
            0
        }
        fn low_consistency_count(&self) -> u32 {
            0
        }
        fn error_rate(&self) -> f64 {
            0.0
        }
        fn request_focused_burst(&self) {
            self.bursts.fetch_add(1, Ordering::SeqCst);
        }
        fn scale_hz(&self, _factor: f64) {}
        fn stop(&self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
        fn observe_energy(&self, _energy_level: f64) {}
    }

    struct NullBidder;
    impl BiddingAgent for NullBidder {
        fn agent_id(&self) -> &str {
            "null"
        }
        fn construct_bid(&self) -> (Vec<Bid>, Vec<GrantRequest>) {
            (Vec::new(), Vec::new())
        }
        fn receive_allocation(&self, _allocations: &[Allocation]) {}
    }

    fn heartbeat() -> Heartbeat {
        let market = Arc::new(RwLock::new(Market::new(MarketConfig::default(), SeekingDrive::default())));
        let awake = Arc::new(NullAwake {
            stopped: AtomicBool::new(false),
            bursts: AtomicU32::new(0),
        });
        Heartbeat::new(market, awake)
    }

    #[test]
    fn tick_appends_to_history_and_respects_ring_capacity() {
        let mut hb = heartbeat();
        hb.register_component(Arc::new(FixedStatus("store", 0)));
        for _ in 0..350 {
            hb.tick(1.0);
        }
        assert_eq!(hb.get_history(1000).len(), 300);
    }

    #[test]
    fn circuit_breaker_trips_and_stops_awake() {
        let mut hb = heartbeat();
        hb.register_component(Arc::new(FixedStatus("noisy", 400)));
        for _ in 0..60 {
            hb.tick(1.0);
        }
        let health = hb.get_health();
        assert!(health.halted);
        assert!(health.halt_reason.is_some());
    }

    #[test]
    fn get_time_series_reads_a_named_metric_across_ticks() {
        let mut hb = heartbeat();
        hb.register_component(Arc::new(FixedStatus("store", 2)));
        for _ in 0..5 {
            hb.tick(1.0);
        }
        let series = hb.get_time_series("store", "errors", 10);
        assert_eq!(series.len(), 5);
        assert!(series.iter().all(|p| p.value == 2.0));
    }

    #[test]
    fn market_tick_runs_every_non_halted_heartbeat_tick() {
        let mut hb = heartbeat();
        hb.register_bidder(Arc::new(NullBidder));
        let ticked = Arc::new(PLMutex::new(0u32));
        let ticked_clone = ticked.clone();
        hb.add_listener(Arc::new(move |_snap: &BrainSnapshot| {
            *ticked_clone.lock() += 1;
        }));
        hb.tick(1.0);
        assert_eq!(*ticked.lock(), 1);
    }
}
