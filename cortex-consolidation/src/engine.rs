//! ReconsolidationEngine (C12, §4.12): per-engram fragile windows opened on
//! retrieval, during which a query's outcome may strengthen, weaken, or
//! flag an engram for refinement.

use std::collections::HashMap;

use parking_lot::Mutex;

use cortex_core::config::ReconsolidationConfig;
use cortex_core::errors::{ConsolidationError, CortexResult};
use cortex_core::models::{Engram, ReconsolidationWindow};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconsolidationStats {
    pub total_strengthened: u64,
    pub total_weakened: u64,
    pub total_updated: u64,
}

/// What `evaluate_and_modify` did to the engram, for the caller to act on
/// (the pipeline persists the mutated engram and, for `needs_refinement`,
/// folds `refinement_context` into the next deliberation attempt).
#[derive(Debug, Clone, Default)]
pub struct ReconsolidationOutcome {
    pub strengthened: bool,
    pub weakened: bool,
    pub needs_refinement: bool,
    pub refinement_context: Option<String>,
}

pub struct ReconsolidationEngine {
    config: ReconsolidationConfig,
    windows: Mutex<HashMap<String, ReconsolidationWindow>>,
    stats: Mutex<ReconsolidationStats>,
}

impl ReconsolidationEngine {
    pub fn new(config: ReconsolidationConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
            stats: Mutex::new(ReconsolidationStats::default()),
        }
    }

    pub fn stats(&self) -> ReconsolidationStats {
        *self.stats.lock()
    }

    /// Idempotent while a window for `engram_id` is already open.
    pub fn open_window(&self, engram_id: &str, query: &str) {
        let mut windows = self.windows.lock();
        let already_open = windows
            .get(engram_id)
            .map(|w| w.is_open(chrono::Utc::now()))
            .unwrap_or(false);
        if !already_open {
            windows.insert(
                engram_id.to_string(),
                ReconsolidationWindow::open(engram_id, query, self.config.window_seconds),
            );
        }
    }

    pub fn is_window_open(&self, engram_id: &str) -> bool {
        self.windows
            .lock()
            .get(engram_id)
            .map(|w| w.is_open(chrono::Utc::now()))
            .unwrap_or(false)
    }

    /// Apply the strengthen/weaken/update rules to `engram` in place. Errors
    /// if no window is currently open for it. The three rules are
    /// independent checks, not mutually exclusive — a severe prediction
    /// error both weakens the engram and flags it for refinement.
    pub fn evaluate_and_modify(
        &self,
        engram: &mut Engram,
        query: &str,
        response_quality: f64,
        prediction_error: f64,
    ) -> CortexResult<ReconsolidationOutcome> {
        if !self.is_window_open(&engram.id) {
            return Err(ConsolidationError::WindowClosed(engram.id.clone()).into());
        }

        let mut outcome = ReconsolidationOutcome::default();

        if response_quality > 0.7 && prediction_error < 0.3 {
            engram.set_quality_score(engram.quality_score() + (0.05_f64).min(response_quality * 0.02));
            engram.set_consistency_score(engram.consistency_score() + 0.01);
            outcome.strengthened = true;
            self.stats.lock().total_strengthened += 1;
            self.record(&engram.id, "strengthened");
        }

        if prediction_error > 0.7 {
            engram.set_quality_score(engram.quality_score() - (0.1_f64).min(prediction_error * 0.05));
            engram.set_decay_score(engram.decay_score() + 0.05);
            outcome.weakened = true;
            self.stats.lock().total_weakened += 1;
            self.record(&engram.id, "weakened");
        }

        if prediction_error > 0.3 {
            outcome.needs_refinement = true;
            outcome.refinement_context = Some(query.to_string());
            self.stats.lock().total_updated += 1;
            self.record(&engram.id, "marked for refinement");
        }

        Ok(outcome)
    }

    fn record(&self, engram_id: &str, description: &str) {
        if let Some(window) = self.windows.lock().get_mut(engram_id) {
            window.record(description);
        }
    }
}
