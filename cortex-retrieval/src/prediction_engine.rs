//! PredictionEngine (C10, §4.10): predicts what the answer will look like
//! before reasoning runs, then scores the surprise once the real answer is
//! in — the signal ReconsolidationEngine strengthens or weakens memories on.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use cortex_core::models::Engram;
use cortex_core::traits::RetrievedEngram;

use crate::fifo_cache::FifoCache;
use crate::similarity::jaccard;

const CONTENT_CACHE_CAPACITY: usize = 500;
const HISTORY_CAPACITY: usize = 200;
const DOMAIN_ROLLING_WINDOW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Cache,
    Context,
    None,
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub content: String,
    pub confidence: f64,
    pub source: PredictionSource,
}

#[derive(Debug, Clone)]
pub struct PredictionErrorRecord {
    pub domain: String,
    pub content_error: f64,
    pub confidence_error: f64,
    pub error_magnitude: f64,
    pub surprise: f64,
    pub at: DateTime<Utc>,
}

pub struct PredictionEngine {
    cache: Mutex<FifoCache<String, String>>,
    history: Mutex<VecDeque<PredictionErrorRecord>>,
    domain_rolling: Mutex<HashMap<String, VecDeque<f64>>>,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(FifoCache::new(CONTENT_CACHE_CAPACITY)),
            history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
            domain_rolling: Mutex::new(HashMap::new()),
        }
    }

    fn best_in_context(context: &[RetrievedEngram]) -> Option<&Engram> {
        context
            .iter()
            .max_by(|a, b| a.rerank_score.partial_cmp(&b.rerank_score).unwrap())
            .map(|r| &r.engram)
    }

    pub fn predict(&self, query: &str, context: &[RetrievedEngram]) -> Prediction {
        let hash = Engram::hash_content(query);
        if let Some(cached) = self.cache.lock().get(&hash) {
            return Prediction {
                content: cached.clone(),
                confidence: 0.8,
                source: PredictionSource::Cache,
            };
        }
        if let Some(best) = Self::best_in_context(context) {
            return Prediction {
                content: best.content.clone(),
                confidence: 0.7 * best.quality_score(),
                source: PredictionSource::Context,
            };
        }
        Prediction {
            content: String::new(),
            confidence: 0.0,
            source: PredictionSource::None,
        }
    }

    /// Score the prediction against what actually happened, append to
    /// history, roll the per-domain average, and cache `query → actual`.
    pub fn compute_error(
        &self,
        query: &str,
        prediction: &Prediction,
        actual_content: &str,
        actual_confidence: f64,
        domain: &str,
    ) -> PredictionErrorRecord {
        let content_error = if prediction.content.is_empty() {
            if actual_content.is_empty() {
                0.0
            } else {
                1.0
            }
        } else {
            1.0 - jaccard(&prediction.content, actual_content)
        };
        let confidence_error = (prediction.confidence - actual_confidence).abs();
        let error_magnitude = 0.7 * content_error + 0.3 * confidence_error;
        let surprise = error_magnitude * (0.3 + 0.7 * prediction.confidence);

        let record = PredictionErrorRecord {
            domain: domain.to_string(),
            content_error,
            confidence_error,
            error_magnitude,
            surprise,
            at: Utc::now(),
        };

        {
            let mut history = self.history.lock();
            history.push_back(record.clone());
            if history.len() > HISTORY_CAPACITY {
                history.pop_front();
            }
        }
        {
            let mut rolling = self.domain_rolling.lock();
            let window = rolling.entry(domain.to_string()).or_default();
            window.push_back(error_magnitude);
            if window.len() > DOMAIN_ROLLING_WINDOW {
                window.pop_front();
            }
        }
        self.cache.lock().put(Engram::hash_content(query), actual_content.to_string());

        record
    }

    pub fn domain_average_error(&self, domain: &str) -> Option<f64> {
        let rolling = self.domain_rolling.lock();
        let window = rolling.get(domain)?;
        if window.is_empty() {
            return None;
        }
        Some(window.iter().sum::<f64>() / window.len() as f64)
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }
}
