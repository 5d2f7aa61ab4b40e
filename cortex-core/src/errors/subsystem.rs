//! Subsystem error enums that fold into `CortexError` via `#[from]`.
//!
//! These follow the taxonomy of kinds in spec §7 — `TransientExternal`,
//! `InvalidInput`, `Saturation`, `Inconsistency`, `Fatal` — without naming
//! the kinds as variants themselves; each subsystem's own vocabulary
//! (`InsufficientFunds`, `MemoryNotFound`, …) is what callers match on, and
//! the taxonomy is the *handling policy* documented alongside each variant.

/// Errors from the internal resource market (§4.4). All variants here are
/// "soft" — a bid simply doesn't win; nothing upstream needs to halt.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid bid: value and amount must be positive")]
    InvalidBid,
    #[error("insufficient funds: agent {agent} has {available}, needs {needed}")]
    InsufficientFunds {
        agent: String,
        available: f64,
        needed: f64,
    },
    #[error("resource exhausted: {resource:?}")]
    ResourceExhausted {
        resource: crate::models::ResourceKind,
    },
    #[error("no such wallet: {agent}")]
    UnknownAgent { agent: String },
}

/// Errors surfaced by the AwakeEngine's mode step.
#[derive(Debug, thiserror::Error)]
pub enum AwakeError {
    #[error("queue is empty")]
    QueueEmpty,
    #[error("refinement failed: {0}")]
    RefinementFailed(String),
    #[error("proof attempt failed: {0}")]
    ProofFailed(String),
}

/// Errors from TruthGuard / TranslatorGate / PredictionEngine / ImpasseDetector.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("empty query")]
    EmptyQuery,
    #[error("gate rejected input: {0}")]
    GateRejected(String),
    #[error("translation failed: {0}")]
    TranslationFailed(String),
}

/// Errors from ReconsolidationEngine / integrity accounting.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidationError {
    #[error("reconsolidation window for engram {0} is not open")]
    WindowClosed(String),
    #[error("no such engram: {0}")]
    UnknownEngram(String),
}

/// Errors from the (external, reference-implemented-for-tests) engram store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("memory not found: {id}")]
    NotFound { id: String },
    #[error("duplicate content for id {existing_id}")]
    DuplicateContent { existing_id: String },
    #[error("backend error: {0}")]
    Backend(String),
}
