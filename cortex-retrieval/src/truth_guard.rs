//! TruthGuard (C8, §4.8): a pure risk score over a retrieved list, and the
//! forced-honest fallback the pipeline falls back to when that risk is
//! too high to let the fast path reason freely.

use cortex_core::traits::RetrievedEngram;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub avg_similarity: f64,
    pub avg_quality: f64,
    pub avg_decay: f64,
    pub risk: f64,
    pub is_safe: bool,
}

const SIMILARITY_WEIGHT: f64 = 0.45;
const QUALITY_WEIGHT: f64 = 0.35;
const DECAY_WEIGHT: f64 = 0.20;
const SAFE_THRESHOLD: f64 = 0.45;

/// `risk = 0.45(1-avg_sim) + 0.35(1-avg_quality) + 0.20*avg_decay` (§4.8).
pub fn assess(retrieved: &[RetrievedEngram]) -> RiskAssessment {
    if retrieved.is_empty() {
        // No evidence at all is the riskiest case the formula can express.
        return RiskAssessment {
            avg_similarity: 0.0,
            avg_quality: 0.0,
            avg_decay: 1.0,
            risk: 1.0,
            is_safe: false,
        };
    }
    let n = retrieved.len() as f64;
    let avg_similarity = retrieved.iter().map(|r| r.cached_similarity).sum::<f64>() / n;
    let avg_quality = retrieved.iter().map(|r| r.engram.quality_score()).sum::<f64>() / n;
    let avg_decay = retrieved.iter().map(|r| r.engram.decay_score()).sum::<f64>() / n;
    let risk = SIMILARITY_WEIGHT * (1.0 - avg_similarity)
        + QUALITY_WEIGHT * (1.0 - avg_quality)
        + DECAY_WEIGHT * avg_decay;
    RiskAssessment {
        avg_similarity,
        avg_quality,
        avg_decay,
        risk,
        is_safe: risk < SAFE_THRESHOLD,
    }
}

/// When `assess` comes back unsafe, synthesize a forced-honest response
/// instead of letting the LLM reason freely: the risk score plus up to six
/// retrieved contents verbatim.
pub fn enforce_honest_response(retrieved: &[RetrievedEngram], assessment: &RiskAssessment) -> Option<String> {
    if assessment.is_safe {
        return None;
    }
    let mut message = format!(
        "I'm not confident enough in what I've retrieved to answer directly (risk {:.2}). Here is what I found:\n",
        assessment.risk
    );
    for r in retrieved.iter().take(6) {
        message.push_str("- ");
        message.push_str(&r.engram.content);
        message.push('\n');
    }
    Some(message)
}
