//! # cortex-decay
//!
//! Pure decay-tick and prune-threshold logic over the `decay.*` config
//! group (spec §6). Holds no state of its own — `AwakeEngine::DREAMING`
//! and any periodic maintenance pass call `decay_tick` per engram and
//! `should_prune` to decide what the store's `prune_orphans` sweeps.

use chrono::{DateTime, Utc};

use cortex_core::config::DecayConfig;
use cortex_core::models::Engram;

/// Inputs `decay_tick` needs beyond the config — split out so it's testable
/// without constructing a full `Engram`.
#[derive(Debug, Clone, Copy)]
pub struct DecayContext {
    pub config: DecayConfig,
    pub now: Option<DateTime<Utc>>,
}

impl Default for DecayContext {
    fn default() -> Self {
        Self {
            config: DecayConfig::default(),
            now: None,
        }
    }
}

impl DecayContext {
    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// Days since an engram was last used.
fn days_since_use(engram: &Engram, now: DateTime<Utc>) -> f64 {
    (now - engram.last_used).num_seconds().max(0) as f64 / 86_400.0
}

/// Advance one engram's `decay_score` by the elapsed time since it was last
/// used, at `rate_daily` per day, and return the new score (already clamped
/// by `Engram::set_decay_score`). High `accuracy_preserved` (above
/// `protect_accuracy_threshold`) halves the effective rate — well-verified
/// content decays more slowly.
pub fn decay_tick(engram: &mut Engram, ctx: &DecayContext) {
    let days = days_since_use(engram, ctx.now());
    let mut rate = ctx.config.rate_daily;
    if engram.accuracy_preserved() >= ctx.config.protect_accuracy_threshold {
        rate *= 0.5;
    }
    let increment = rate * days;
    engram.set_decay_score(engram.decay_score() + increment);
}

/// Whether an engram is a prune candidate under `decay.prune_threshold`.
/// Orphan protection (last member of a non-noise cluster) is the caller's
/// responsibility, since it requires cluster membership counts the engram
/// alone does not carry.
pub fn should_prune(engram: &Engram, config: &DecayConfig) -> bool {
    engram.quality_score() < config.prune_threshold
}

/// An engine wrapper mirroring the teacher's `DecayEngine`/`process_batch`
/// shape, for callers that want to decay many engrams in one pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecayEngine;

impl DecayEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decay every engram in place.
    pub fn process_batch(&self, engrams: &mut [Engram], ctx: &DecayContext) {
        for engram in engrams.iter_mut() {
            decay_tick(engram, ctx);
        }
    }
}
