//! The quality score formula (§6 reference). Shared by `cortex-decay` (which
//! recomputes it on every decay tick) and `cortex-consolidation` (which
//! nudges the cached `quality_score` directly rather than recomputing it,
//! per §4.12's additive strengthen/weaken rules).

use serde::{Deserialize, Serialize};

use crate::models::engram::clamp;

/// Weights for the usage/reuse/compression/accuracy/freshness blend.
/// The spec's `quality_weights` config group; defaults sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub usage: f64,
    pub reuse: f64,
    pub compression: f64,
    pub accuracy: f64,
    pub freshness: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            usage: 0.25,
            reuse: 0.15,
            compression: 0.1,
            accuracy: 0.3,
            freshness: 0.2,
        }
    }
}

/// Salience reweighting factor (§9 open question: always active, the gate
/// is exposed as configuration rather than a second code path).
pub const SALIENCE_WEIGHT: f64 = 0.15;

/// Inputs to the quality formula, decoupled from `Engram` so it can be
/// computed from a partial snapshot (e.g. during decay ticks without
/// round-tripping through storage).
pub struct QualityInputs {
    pub successful_application_count: u64,
    pub reuse_contexts: u32,
    pub compression_ratio: f64,
    pub accuracy_preserved: f64,
    pub decay_score: f64,
    pub salience: f64,
}

/// Recompute `quality_score` from its component signals (§6).
pub fn quality_score(inputs: &QualityInputs, weights: &QualityWeights) -> f64 {
    let n_usage = clamp(
        ((1.0 + inputs.successful_application_count as f64).ln()) / 5.0,
        0.0,
        1.0,
    );
    let n_reuse = clamp(inputs.reuse_contexts as f64 / 5.0, 0.0, 1.0);
    let n_compression = clamp(inputs.compression_ratio / 5.0, 0.0, 1.0);
    let freshness = 1.0 - inputs.decay_score;
    let salience_norm = clamp((inputs.salience - 0.5) / 1.5, 0.0, 1.0);

    let base = (1.0 - SALIENCE_WEIGHT)
        * (weights.usage * n_usage
            + weights.reuse * n_reuse
            + weights.compression * n_compression
            + weights.accuracy * inputs.accuracy_preserved
            + weights.freshness * freshness)
        + SALIENCE_WEIGHT * salience_norm;

    clamp(base, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_heavily_used_engram_scores_high() {
        let inputs = QualityInputs {
            successful_application_count: 100,
            reuse_contexts: 10,
            compression_ratio: 5.0,
            accuracy_preserved: 1.0,
            decay_score: 0.0,
            salience: 2.0,
        };
        let score = quality_score(&inputs, &QualityWeights::default());
        assert!(score > 0.9, "expected high score, got {score}");
    }

    #[test]
    fn decayed_unused_engram_scores_low() {
        let inputs = QualityInputs {
            successful_application_count: 0,
            reuse_contexts: 0,
            compression_ratio: 1.0,
            accuracy_preserved: 0.0,
            decay_score: 1.0,
            salience: 0.5,
        };
        let score = quality_score(&inputs, &QualityWeights::default());
        assert!(score < 0.1, "expected low score, got {score}");
    }

    #[test]
    fn score_always_in_unit_range() {
        let inputs = QualityInputs {
            successful_application_count: 1_000_000,
            reuse_contexts: 10_000,
            compression_ratio: 50.0,
            accuracy_preserved: 1.0,
            decay_score: 0.0,
            salience: 2.0,
        };
        let score = quality_score(&inputs, &QualityWeights::default());
        assert!((0.0..=1.0).contains(&score));
    }
}
