use super::{AwakeError, ConsolidationError, MarketError, RetrievalError, StorageError};

/// Top-level error type for the Cortex cognitive scheduling core.
/// All subsystem errors convert into this via `From` impls, per §9's
/// "result-carrying type for every collaborator call" redesign note.
#[derive(Debug, thiserror::Error)]
pub enum CortexError {
    #[error("engram not found: {id}")]
    EngramNotFound { id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("market error: {0}")]
    Market(#[from] MarketError),

    #[error("awake engine error: {0}")]
    Awake(#[from] AwakeError),

    #[error("retrieval/deliberation error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("consolidation error: {0}")]
    Consolidation(#[from] ConsolidationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("collaborator {collaborator} timed out or failed transiently: {message}")]
    TransientExternal {
        collaborator: String,
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("circuit breaker tripped: {reason}")]
    Halted { reason: String },
}

/// Convenience type alias.
pub type CortexResult<T> = Result<T, CortexError>;
