//! # test-fixtures
//!
//! In-memory reference implementations of every collaborator trait in
//! `cortex-core::traits`, used by this workspace's integration tests
//! instead of a real vector index, LLM, or theorem prover.

mod collaborators;
mod store;

pub use collaborators::{
    StubEmbeddingProvider, StubLlmProvider, StubProofProvider, StubRetriever, StubRouter, StubSemanticBridge,
    IMAGE_VECTOR_LEN, TEXT_VECTOR_LEN,
};
pub use store::InMemoryEngramStore;
