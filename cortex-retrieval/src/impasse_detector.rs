//! ImpasseDetector (C11, §4.11): classifies a failed-or-shaky deliberation
//! into a typed impasse with a sub-goal, deduplicating repeats within an
//! hour and pruning ones that have gone stale.

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use cortex_core::models::{Impasse, ImpasseType, ProofResult};

/// Everything `classify` needs about the deliberation attempt that just
/// finished (§4.11).
#[derive(Debug, Clone, Default)]
pub struct DetectionContext {
    pub confidence: f64,
    pub engrams_found: usize,
    pub gate_confidence: f64,
    pub proof_result: Option<ProofResult>,
}

const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("physics", &["force", "energy", "quantum", "velocity", "mass", "gravity", "momentum"]),
    ("mathematics", &["theorem", "equation", "integral", "derivative", "proof", "algebra", "calculus"]),
    ("logic", &["syllogism", "predicate", "inference", "axiom", "entails", "tautology"]),
    ("biology", &["cell", "organism", "gene", "protein", "evolution", "enzyme", "species"]),
    ("philosophy", &["ethics", "metaphysics", "epistemology", "ontology", "morality"]),
    ("computer_science", &["algorithm", "compiler", "database", "network", "software", "recursion"]),
];

pub fn infer_domain(query: &str) -> String {
    let lower = query.to_lowercase();
    for (domain, keywords) in DOMAIN_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return domain.to_string();
        }
    }
    "general".to_string()
}

/// Priority-ordered classification (§4.11). Returns `None` when nothing in
/// the attempt warrants recording an impasse.
pub fn classify(ctx: &DetectionContext) -> Option<(ImpasseType, f64, &'static str)> {
    if ctx.gate_confidence < 0.4 {
        return Some((ImpasseType::GateRejected, 0.3, "Clarify the original query"));
    }
    if ctx.engrams_found == 0 {
        return Some((ImpasseType::NoEngrams, 0.7, "Acquire knowledge in domain X"));
    }
    if let Some(proof) = &ctx.proof_result {
        if !proof.proven && proof.axioms_used.is_empty() {
            return Some((ImpasseType::NoAxioms, 0.8, "Derive or acquire applicable axioms"));
        }
        if !proof.proven {
            return Some((ImpasseType::ProofFailed, 0.6, "Find a working proof strategy"));
        }
    }
    if ctx.confidence < 0.3 {
        return Some((ImpasseType::LowConfidence, 0.5, "Gather stronger supporting evidence"));
    }
    None
}

pub struct ImpasseDetector {
    impasses: Mutex<Vec<Impasse>>,
}

impl Default for ImpasseDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpasseDetector {
    pub fn new() -> Self {
        Self {
            impasses: Mutex::new(Vec::new()),
        }
    }

    fn prune_stale_locked(impasses: &mut Vec<Impasse>) {
        let now = Utc::now();
        impasses.retain(|i| !i.is_stale(now));
    }

    pub fn record(
        &self,
        query: &str,
        domain: &str,
        impasse_type: ImpasseType,
        reason: &str,
        sub_goal: &str,
        priority: f64,
    ) -> Impasse {
        let now = Utc::now();
        let mut impasses = self.impasses.lock();
        Self::prune_stale_locked(&mut impasses);

        if let Some(existing) = impasses
            .iter_mut()
            .find(|i| i.is_duplicate_of(impasse_type, domain, now))
        {
            existing.bump_duplicate();
            return existing.clone();
        }

        let impasse = Impasse::new(Uuid::new_v4().to_string(), query, impasse_type, reason, sub_goal, domain, priority);
        impasses.push(impasse.clone());
        impasse
    }

    /// Classify the attempt and record an impasse for it, if warranted.
    pub fn classify_and_record(&self, query: &str, domain: &str, ctx: &DetectionContext) -> Option<Impasse> {
        let (impasse_type, priority, sub_goal) = classify(ctx)?;
        let reason = format!("{impasse_type:?}");
        Some(self.record(query, domain, impasse_type, &reason, sub_goal, priority))
    }

    pub fn active(&self) -> Vec<Impasse> {
        let mut impasses = self.impasses.lock();
        Self::prune_stale_locked(&mut impasses);
        impasses.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_gate_rejected_above_everything_else() {
        let ctx = DetectionContext {
            confidence: 0.0,
            engrams_found: 0,
            gate_confidence: 0.1,
            proof_result: None,
        };
        let (impasse_type, _, _) = classify(&ctx).unwrap();
        assert_eq!(impasse_type, ImpasseType::GateRejected);
    }

    #[test]
    fn classifies_no_engrams_when_gate_is_fine() {
        let ctx = DetectionContext {
            confidence: 0.9,
            engrams_found: 0,
            gate_confidence: 0.9,
            proof_result: None,
        };
        let (impasse_type, _, _) = classify(&ctx).unwrap();
        assert_eq!(impasse_type, ImpasseType::NoEngrams);
    }

    #[test]
    fn no_impasse_when_everything_looks_fine() {
        let ctx = DetectionContext {
            confidence: 0.9,
            engrams_found: 3,
            gate_confidence: 0.9,
            proof_result: None,
        };
        assert!(classify(&ctx).is_none());
    }

    #[test]
    fn duplicate_within_an_hour_bumps_rather_than_duplicates() {
        let detector = ImpasseDetector::new();
        let first = detector.record("q", "physics", ImpasseType::NoEngrams, "r", "acquire", 0.7);
        let second = detector.record("q", "physics", ImpasseType::NoEngrams, "r", "acquire", 0.7);
        assert_eq!(first.id, second.id);
        assert_eq!(second.attempts, 2);
        assert_eq!(detector.active().len(), 1);
    }

    #[test]
    fn domain_inference_matches_keywords_and_falls_back() {
        assert_eq!(infer_domain("what is the gravity on mars"), "physics");
        assert_eq!(infer_domain("prove this theorem"), "mathematics");
        assert_eq!(infer_domain("what's your favorite color"), "general");
    }
}
