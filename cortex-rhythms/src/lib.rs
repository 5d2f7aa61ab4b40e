//! # cortex-rhythms
//!
//! The named oscillator registry (C7, §4.7): every periodic subsystem —
//! the gate, retrieval, reasoning, consolidation, and the slow dreaming
//! sweep — runs at its own, independently-adjustable frequency instead of
//! sharing the Heartbeat's 1 Hz. `modulate` damps frequency changes so a
//! noisy feedback signal can't make a rhythm oscillate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

/// `min`/`max` bound how far `modulate` can ever push a rhythm; the spec
/// names only `base` per rhythm, so bounds are set to a decade either side
/// of base (documented as an open-question resolution) except for
/// `heartbeat`, which is fixed — it is the master clock, not a follower.
const MAX_STEP_FRACTION: f64 = 0.10;

#[derive(Debug, Clone, Copy)]
pub struct RhythmState {
    pub min_hz: f64,
    pub max_hz: f64,
    pub base_hz: f64,
    pub current_hz: f64,
}

impl RhythmState {
    pub fn new(min_hz: f64, max_hz: f64, base_hz: f64) -> Self {
        let current_hz = base_hz.clamp(min_hz, max_hz);
        Self {
            min_hz,
            max_hz,
            base_hz,
            current_hz,
        }
    }

    pub fn fixed(hz: f64) -> Self {
        Self::new(hz, hz, hz)
    }

    /// Move `current_hz` toward `target`, by at most ±10% of the current
    /// value per call (§4.7).
    pub fn modulate(&mut self, target: f64) {
        let target = target.clamp(self.min_hz, self.max_hz);
        let max_step = self.current_hz * MAX_STEP_FRACTION;
        let delta = (target - self.current_hz).clamp(-max_step, max_step);
        self.current_hz = (self.current_hz + delta).clamp(self.min_hz, self.max_hz);
    }
}

pub struct RhythmRegistry {
    rhythms: HashMap<String, RhythmState>,
}

impl RhythmRegistry {
    pub fn empty() -> Self {
        Self {
            rhythms: HashMap::new(),
        }
    }

    /// The six named rhythms of §4.7, at their base frequencies.
    pub fn with_defaults() -> Self {
        let mut rhythms = HashMap::new();
        rhythms.insert("heartbeat".to_string(), RhythmState::fixed(1.0));
        rhythms.insert("gate".to_string(), RhythmState::new(0.2, 20.0, 2.0));
        rhythms.insert("retrieval".to_string(), RhythmState::new(1.0, 100.0, 10.0));
        rhythms.insert("reasoning".to_string(), RhythmState::new(0.2, 20.0, 2.0));
        rhythms.insert("consolidation".to_string(), RhythmState::new(0.02, 2.0, 0.2));
        rhythms.insert("dreaming".to_string(), RhythmState::new(0.001, 0.1, 0.01));
        Self { rhythms }
    }

    pub fn register(&mut self, name: impl Into<String>, state: RhythmState) {
        self.rhythms.insert(name.into(), state);
    }

    pub fn get(&self, name: &str) -> Option<RhythmState> {
        self.rhythms.get(name).copied()
    }

    pub fn current_hz(&self, name: &str) -> Option<f64> {
        self.rhythms.get(name).map(|r| r.current_hz)
    }

    pub fn modulate(&mut self, name: &str, target: f64) {
        if let Some(rhythm) = self.rhythms.get_mut(name) {
            rhythm.modulate(target);
        }
    }
}

impl Default for RhythmRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Drive one rhythm's callback at `1 / current_hz` period until `running`
/// returns false. A callback failure backs off a flat second rather than
/// the rhythm's own period, so a sick subsystem doesn't get battered at
/// its natural frequency.
pub async fn run_rhythm<F, Fut, E>(
    registry: Arc<RwLock<RhythmRegistry>>,
    name: &str,
    mut running: impl FnMut() -> bool,
    mut callback: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    while running() {
        let hz = registry
            .read()
            .current_hz(name)
            .unwrap_or(1.0)
            .max(0.001);
        match callback().await {
            Ok(()) => tokio::time::sleep(Duration::from_secs_f64(1.0 / hz)).await,
            Err(err) => {
                tracing::warn!(rhythm = name, error = %err, "rhythm callback failed, backing off");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_never_jumps_more_than_ten_percent() {
        let mut state = RhythmState::new(0.1, 100.0, 10.0);
        state.modulate(100.0);
        assert!((state.current_hz - 11.0).abs() < 1e-9);
    }

    #[test]
    fn modulate_respects_bounds() {
        let mut state = RhythmState::new(1.0, 5.0, 2.0);
        for _ in 0..1000 {
            state.modulate(1000.0);
        }
        assert!(state.current_hz <= 5.0);
    }

    #[test]
    fn heartbeat_rhythm_is_fixed() {
        let registry = RhythmRegistry::with_defaults();
        assert_eq!(registry.current_hz("heartbeat"), Some(1.0));
    }

    #[tokio::test]
    async fn run_rhythm_never_calls_back_once_not_running() {
        let registry = Arc::new(RwLock::new(RhythmRegistry::with_defaults()));
        let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let calls_inner = calls.clone();
        run_rhythm::<_, _, String>(
            registry,
            "dreaming",
            || false,
            move || {
                calls_inner.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                async move { Ok(()) }
            },
        )
        .await;
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
