//! # cortex-consolidation
//!
//! The ReconsolidationEngine (C12, §4.12) and the integrity accounting
//! (§6's `user_feedback_helpful/wrong`) that shares its strengthen/weaken
//! vocabulary, plus an auto-tuning pass over both subsystems' thresholds.

pub mod engine;
pub mod integrity;
pub mod monitoring;

pub use engine::{ReconsolidationEngine, ReconsolidationOutcome, ReconsolidationStats};
pub use integrity::{user_feedback_helpful, user_feedback_wrong, INTEGRITY_HELPFUL_DELTA, INTEGRITY_WRONG_DELTA};
