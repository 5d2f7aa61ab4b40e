//! `EmbeddingProvider`: text/image encoder (§6). The model itself is a
//! Non-goal; the core only needs a fixed-length, L2-normalized vector back.

use async_trait::async_trait;

use crate::errors::CortexResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingKind {
    Text,
    Image,
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn encode(&self, content: &str, kind: EmbeddingKind) -> CortexResult<Vec<f32>>;
}
