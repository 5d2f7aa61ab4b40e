//! Integrity accounting (§6's `user_feedback_helpful/wrong`): explicit
//! trust feedback on an engram from the last query's retrieved set.
//!
//! `integrity_score` moves independently of whether a reconsolidation
//! window happens to still be open — feedback is explicit and shouldn't
//! be lost to a 30-second timer — but when a window *is* open we also run
//! it through the engine's strengthen/weaken rule, since the spec names
//! feedback as acting on the same "strengthen or weaken" vocabulary as C12.

use cortex_core::models::{Engram, VerificationAction};

use crate::engine::ReconsolidationEngine;

/// 5x loss aversion: a wrong answer costs five times what a helpful one earns.
pub const INTEGRITY_HELPFUL_DELTA: f64 = 0.05;
pub const INTEGRITY_WRONG_DELTA: f64 = -0.25;

pub fn user_feedback_helpful(engine: &ReconsolidationEngine, engram: &mut Engram) {
    if engine.is_window_open(&engram.id) {
        let _ = engine.evaluate_and_modify(engram, "feedback:helpful", 1.0, 0.0);
    }
    engram.set_integrity_score(engram.integrity_score() + INTEGRITY_HELPFUL_DELTA);
    engram.append_verification(VerificationAction::Corroborated, "user_feedback_helpful");
}

pub fn user_feedback_wrong(engine: &ReconsolidationEngine, engram: &mut Engram) {
    if engine.is_window_open(&engram.id) {
        let _ = engine.evaluate_and_modify(engram, "feedback:wrong", 0.0, 1.0);
    }
    engram.set_integrity_score(engram.integrity_score() + INTEGRITY_WRONG_DELTA);
    engram.append_verification(VerificationAction::Disputed, "user_feedback_wrong");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::config::ReconsolidationConfig;
    use cortex_core::models::EngramMetadata;

    fn engram() -> Engram {
        Engram::new("e1", "content", EngramMetadata::new("test"))
    }

    #[test]
    fn helpful_feedback_raises_integrity_by_fixed_delta() {
        let engine = ReconsolidationEngine::new(ReconsolidationConfig::default());
        let mut e = engram();
        let before = e.integrity_score();
        user_feedback_helpful(&engine, &mut e);
        assert!((e.integrity_score() - (before + 0.05)).abs() < 1e-9);
        assert_eq!(e.verification_history.len(), 1);
    }

    #[test]
    fn wrong_feedback_costs_five_times_a_helpful_gain() {
        let engine = ReconsolidationEngine::new(ReconsolidationConfig::default());
        let mut e = engram();
        let before = e.integrity_score();
        user_feedback_wrong(&engine, &mut e);
        assert!((e.integrity_score() - (before - 0.25)).abs() < 1e-9);
        assert_eq!(INTEGRITY_WRONG_DELTA.abs(), INTEGRITY_HELPFUL_DELTA * 5.0);
    }

    #[test]
    fn integrity_score_stays_clamped_under_repeated_wrong_feedback() {
        let engine = ReconsolidationEngine::new(ReconsolidationConfig::default());
        let mut e = engram();
        for _ in 0..10 {
            user_feedback_wrong(&engine, &mut e);
        }
        assert_eq!(e.integrity_score(), 0.0);
    }

    #[test]
    fn feedback_applies_reconsolidation_effect_when_window_open() {
        let engine = ReconsolidationEngine::new(ReconsolidationConfig::default());
        let mut e = engram();
        engine.open_window(&e.id, "q");
        let quality_before = e.quality_score();
        user_feedback_helpful(&engine, &mut e);
        assert!(e.quality_score() > quality_before);
    }
}
