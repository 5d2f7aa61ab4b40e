//! Embedding dimensionality. The embedding function itself is an external
//! collaborator (non-goal); only the two known vector lengths are config.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub embedding_dim_text: usize,
    pub embedding_dim_image: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            embedding_dim_text: 384,
            embedding_dim_image: 512,
        }
    }
}
