//! End-to-end deliberation pipeline scenarios, wired with the in-memory
//! store and stub collaborators from `test-fixtures`.

use std::sync::Arc;

use cortex_core::config::{GateConfig, ReasoningConfig, ReconsolidationConfig, WorkingMemoryConfig};
use cortex_core::models::{Engram, EngramMetadata};
use cortex_core::traits::RetrievedEngram;
use cortex_consolidation::ReconsolidationEngine;
use cortex_engine::{DeliberationPipeline, PipelineCollaborators};
use cortex_retrieval::TranslatorGate;
use cortex_session::WorkingMemory;
use test_fixtures::{
    InMemoryEngramStore, StubEmbeddingProvider, StubLlmProvider, StubProofProvider, StubRetriever, StubSemanticBridge,
};

fn build_pipeline(retrieved: Vec<RetrievedEngram>, llm: StubLlmProvider) -> (DeliberationPipeline, Arc<StubRetriever>) {
    let retriever = Arc::new(StubRetriever::new(retrieved));
    let collaborators = PipelineCollaborators {
        store: Arc::new(InMemoryEngramStore::new()),
        retriever: retriever.clone(),
        router: None,
        llm: Arc::new(llm),
        proof: Arc::new(StubProofProvider::default()),
        bridge: Arc::new(StubSemanticBridge::default()),
        embedding: Arc::new(StubEmbeddingProvider),
    };
    let gate_llm = Arc::new(StubLlmProvider::default());
    let gate = TranslatorGate::new(gate_llm, GateConfig::default());
    let reconsolidation = Arc::new(ReconsolidationEngine::new(ReconsolidationConfig::default()));
    let working_memory = Arc::new(WorkingMemory::new(WorkingMemoryConfig::default()));
    let pipeline = DeliberationPipeline::new(collaborators, gate, reconsolidation, working_memory, ReasoningConfig::default(), 5);
    (pipeline, retriever)
}

fn retrieved_engram(id: &str, content: &str, quality: f64, similarity: f64, decay: f64) -> RetrievedEngram {
    let mut e = Engram::new(id, content, EngramMetadata::new("test"));
    e.set_quality_score(quality);
    e.set_decay_score(decay);
    RetrievedEngram::new(e, 5.0).with_similarity(similarity)
}

/// S1: a high-quality, high-similarity needle is retrieved and should make
/// it into the fast path's reasoned answer rather than being drowned out.
#[tokio::test]
async fn needle_in_haystack_retrieval_feeds_the_fast_path() {
    let needle = retrieved_engram(
        "needle",
        "The launch date for Project Omega is CODE-2027-05-15",
        0.9,
        0.9,
        0.05,
    );
    let (pipeline, _retriever) = build_pipeline(
        vec![needle],
        StubLlmProvider {
            reasoned_answer: "CODE-2027-05-15".to_string(),
            ..Default::default()
        },
    );

    let (response, retrieved) = pipeline.process_query("When is Project Omega launching?").await.unwrap();
    assert_eq!(response, "CODE-2027-05-15");
    assert_eq!(retrieved.len(), 1);
    assert_eq!(retrieved[0].engram.id, "needle");
}

/// S2: two low-quality, high-decay, middling-similarity engrams push risk
/// over the safe threshold and force the honest fallback instead of letting
/// the LLM reason freely.
#[tokio::test]
async fn low_quality_high_decay_retrieval_forces_honest_fallback() {
    let a = retrieved_engram("a", "first shaky fact", 0.15, 0.65, 0.9);
    let b = retrieved_engram("b", "second shaky fact", 0.15, 0.65, 0.9);
    let (pipeline, _retriever) = build_pipeline(vec![a, b], StubLlmProvider::default());

    let (response, _retrieved) = pipeline.process_query("what happened").await.unwrap();
    assert!(response.contains("first shaky fact"));
    assert!(response.contains("second shaky fact"));
}

/// S6: a confident, low-error first attempt should stop the deliberation
/// loop after exactly one retrieval call.
#[tokio::test]
async fn high_confidence_first_attempt_stops_after_one_iteration() {
    let e = retrieved_engram("e1", "a solid supporting fact", 0.95, 0.95, 0.0);
    let (pipeline, retriever) = build_pipeline(
        vec![e],
        StubLlmProvider {
            reasoned_answer: "a solid supporting fact".to_string(),
            ..Default::default()
        },
    );

    let (response, retrieved) = pipeline.process_query("tell me the fact").await.unwrap();
    assert!(!response.is_empty());
    assert_eq!(retrieved.len(), 1);
    assert_eq!(retriever.call_count(), 1);
}

/// An empty retrieval result should still resolve (via the forced-honest
/// path, since no evidence is the riskiest case) rather than panicking.
#[tokio::test]
async fn empty_retrieval_does_not_panic_and_resolves_via_honest_fallback() {
    let (pipeline, _retriever) = build_pipeline(vec![], StubLlmProvider::default());
    let (response, retrieved) = pipeline.process_query("anything at all").await.unwrap();
    assert!(retrieved.is_empty());
    assert!(!response.is_empty());
}
