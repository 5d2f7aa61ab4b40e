//! TranslatorGate (C9, §4.9): ask the LLM for several paraphrases of the
//! raw query, vote on the one closest to a consensus, and flag low
//! agreement or a risky-looking synthesized stub for the caller.

use std::sync::Arc;

use parking_lot::Mutex;

use cortex_core::config::GateConfig;
use cortex_core::errors::{CortexResult, RetrievalError};
use cortex_core::models::{Engram, EngramMetadata};
use cortex_core::traits::{LlmProvider, RetrievedEngram};

use crate::fifo_cache::FifoCache;
use crate::similarity::jaccard;
use crate::truth_guard;

const CACHE_CAPACITY: usize = 200;
const TRUTH_GUARD_FLAG_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct GateResult {
    pub content: String,
    pub agreement: f64,
    pub gate_confidence: f64,
    pub needs_clarification: bool,
    pub truth_guard_flagged: bool,
}

pub struct TranslatorGate {
    llm: Arc<dyn LlmProvider>,
    config: GateConfig,
    cache: Mutex<FifoCache<String, GateResult>>,
}

impl TranslatorGate {
    pub fn new(llm: Arc<dyn LlmProvider>, config: GateConfig) -> Self {
        Self {
            llm,
            config,
            cache: Mutex::new(FifoCache::new(CACHE_CAPACITY)),
        }
    }

    pub async fn filter(&self, raw_query: &str) -> CortexResult<GateResult> {
        if raw_query.trim().is_empty() {
            return Err(RetrievalError::EmptyQuery.into());
        }
        let hash = Engram::hash_content(raw_query);
        if let Some(cached) = self.cache.lock().get(&hash) {
            return Ok(cached.clone());
        }

        let mut variants = self.llm.expand_query(raw_query).await?;
        if variants.is_empty() {
            variants.push(raw_query.to_string());
        }
        let n = variants.len();

        let mut best_idx = 0;
        let mut best_mean = 0.0;
        for i in 0..n {
            let others = n.saturating_sub(1).max(1) as f64;
            let mean: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| jaccard(&variants[i], &variants[j]))
                .sum::<f64>()
                / others;
            if mean >= best_mean {
                best_mean = mean;
                best_idx = i;
            }
        }
        let agreement = if n == 1 { 1.0 } else { best_mean };
        let content = variants[best_idx].clone();

        let stub = Engram::new("translator-gate-stub", &content, EngramMetadata::new("translator_gate"));
        let stub_retrieved = vec![RetrievedEngram::new(stub, 0.0)];
        let risk = truth_guard::assess(&stub_retrieved).risk;

        let result = GateResult {
            content,
            agreement,
            gate_confidence: agreement,
            needs_clarification: agreement < self.config.min_agreement,
            truth_guard_flagged: risk > TRUTH_GUARD_FLAG_THRESHOLD,
        };
        self.cache.lock().put(hash, result.clone());
        Ok(result)
    }
}
