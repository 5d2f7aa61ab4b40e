//! `Router`: routes a query to candidate cluster ids (§6). Clustering
//! itself is a Non-goal; the router is just consulted for an opinion.

use async_trait::async_trait;

use crate::errors::CortexResult;

#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, query: &str, top_k: usize) -> CortexResult<Vec<String>>;
}
