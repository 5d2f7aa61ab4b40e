//! A 60-tick sliding window over per-tick error counts (§4.5 step 3). Once
//! tripped, it stays tripped — the Heartbeat keeps ticking snapshots so
//! operators can diagnose, but `AwakeEngine` is expected to stop.

use std::collections::VecDeque;

const WINDOW: usize = 60;
const MEAN_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    window: VecDeque<u32>,
    halted: bool,
    halt_reason: Option<String>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW),
            halted: false,
            halt_reason: None,
        }
    }
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn halt_reason(&self) -> Option<&str> {
        self.halt_reason.as_deref()
    }

    fn mean(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<u32>() as f64 / self.window.len() as f64
    }

    /// Record one tick's error count. Returns `true` the instant the breaker
    /// trips (edge, not level) so callers can log a single transition.
    pub fn record(&mut self, error_count: u32) -> bool {
        if self.halted {
            return false;
        }
        self.window.push_back(error_count);
        if self.window.len() > WINDOW {
            self.window.pop_front();
        }
        if self.mean() > MEAN_THRESHOLD {
            self.halted = true;
            self.halt_reason = Some(format!(
                "circuit breaker tripped: mean error count {:.2} over {} ticks exceeds {}",
                self.mean(),
                self.window.len(),
                MEAN_THRESHOLD
            ));
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_closed_under_threshold() {
        let mut breaker = CircuitBreaker::new();
        for _ in 0..100 {
            assert!(!breaker.record(3));
        }
        assert!(!breaker.halted());
    }

    #[test]
    fn trips_once_mean_exceeds_threshold() {
        let mut breaker = CircuitBreaker::new();
        for _ in 0..59 {
            breaker.record(0);
        }
        // window mean will be 6*1/60 = 0.1 unless we push a big burst; push
        // enough errors this tick to push the 60-tick mean over 5.0.
        let tripped = breaker.record(400);
        assert!(tripped);
        assert!(breaker.halted());
        assert!(breaker.halt_reason().is_some());
    }

    #[test]
    fn stays_tripped_and_ignores_further_records() {
        let mut breaker = CircuitBreaker::new();
        for _ in 0..60 {
            breaker.record(100);
        }
        assert!(breaker.halted());
        let reason_before = breaker.halt_reason().map(String::from);
        breaker.record(0);
        assert_eq!(breaker.halt_reason().map(String::from), reason_before);
    }
}
