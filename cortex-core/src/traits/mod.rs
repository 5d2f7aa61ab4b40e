//! Collaborator capability interfaces (§6). The core depends only on these
//! traits, never on a concrete vector index, LLM, or proof engine.

mod awake_control;
mod bidding_agent;
mod embedding_provider;
mod engram_store;
mod llm_provider;
mod proof_provider;
mod retriever;
mod router;
mod semantic_bridge;
mod status_provider;

pub use awake_control::AwakeControl;
pub use bidding_agent::BiddingAgent;
pub use embedding_provider::{EmbeddingKind, EmbeddingProvider};
pub use engram_store::{EngramStore, IterOrder, IterPredicate};
pub use llm_provider::LlmProvider;
pub use proof_provider::ProofProvider;
pub use retriever::{RetrievedEngram, Retriever};
pub use router::Router;
pub use semantic_bridge::SemanticBridge;
pub use status_provider::StatusProvider;
