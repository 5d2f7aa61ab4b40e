//! Retrieval-facing knobs. The reranker itself lives with the external
//! `Retriever` collaborator; `reranking_enabled`/`rerank_min_score` are the
//! thresholds the core applies to whatever `_rerank_score` it returns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub mmr_lambda: f64,
    pub reranking_enabled: bool,
    pub rerank_min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            mmr_lambda: 0.7,
            reranking_enabled: true,
            rerank_min_score: -2.0,
        }
    }
}
