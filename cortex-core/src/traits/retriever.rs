//! `Retriever`: the external vector-index-backed search collaborator (§6).
//! The ANN algorithm and index format are Non-goals; the core only ever
//! sees ranked engrams annotated with an opaque rerank score.

use async_trait::async_trait;

use crate::errors::CortexResult;
use crate::models::Engram;

/// An engram as returned by retrieval, carrying the opaque `_rerank_score`
/// the spec names (§6) alongside a cached similarity used by TruthGuard.
#[derive(Debug, Clone)]
pub struct RetrievedEngram {
    pub engram: Engram,
    pub rerank_score: f64,
    /// Cached cosine similarity to the query; defaults to 0.65 when the
    /// collaborator does not supply one (§4.8).
    pub cached_similarity: f64,
}

impl RetrievedEngram {
    pub fn new(engram: Engram, rerank_score: f64) -> Self {
        Self {
            engram,
            rerank_score,
            cached_similarity: 0.65,
        }
    }

    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.cached_similarity = similarity;
        self
    }
}

#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(
        &self,
        query: &str,
        top_k: usize,
        cluster: Option<&str>,
        graph_depth: u32,
    ) -> CortexResult<Vec<RetrievedEngram>>;
}
