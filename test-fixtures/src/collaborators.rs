//! Deterministic stand-ins for every external collaborator trait (§6),
//! configurable enough to drive the S1-S6 scenarios without a real LLM,
//! vector index, or theorem prover.

use async_trait::async_trait;
use parking_lot::Mutex;

use cortex_core::errors::CortexResult;
use cortex_core::models::{Engram, EngramMetadata, ProofResult, Proposition};
use cortex_core::traits::{EmbeddingKind, EmbeddingProvider, LlmProvider, ProofProvider, RetrievedEngram, Retriever, Router, SemanticBridge};

pub const TEXT_VECTOR_LEN: usize = 8;
pub const IMAGE_VECTOR_LEN: usize = 16;

/// Echoes the query back as its answer and reports a fixed, configurable
/// salience rating; `expand_query` just repeats the input `n` times so
/// `TranslatorGate`'s agreement score comes out deterministic.
pub struct StubLlmProvider {
    pub variants: Vec<String>,
    pub reasoned_answer: String,
    pub salience: f64,
}

impl Default for StubLlmProvider {
    fn default() -> Self {
        Self {
            variants: vec!["paraphrase one".to_string(), "paraphrase one restated".to_string()],
            reasoned_answer: "a reasoned answer".to_string(),
            salience: 1.0,
        }
    }
}

#[async_trait]
impl LlmProvider for StubLlmProvider {
    async fn reason(&self, _query: &str, _context: &str) -> CortexResult<String> {
        Ok(self.reasoned_answer.clone())
    }

    async fn refine(&self, content: &str) -> CortexResult<String> {
        Ok(format!("{content} (refined)"))
    }

    async fn compress(&self, text: &str, _context: &str) -> CortexResult<String> {
        Ok(text.chars().take(200).collect())
    }

    async fn rate_salience(&self, _text: &str) -> CortexResult<f64> {
        Ok(self.salience)
    }

    async fn expand_query(&self, query: &str) -> CortexResult<Vec<String>> {
        if self.variants.is_empty() {
            Ok(vec![query.to_string()])
        } else {
            Ok(self.variants.clone())
        }
    }

    async fn connect_concepts(&self, a: &str, b: &str) -> CortexResult<String> {
        Ok(format!("{a} relates to {b}"))
    }
}

/// Always proves (or always fails) by construction, with a fixed confidence.
pub struct StubProofProvider {
    pub proves: bool,
    pub confidence: f64,
}

impl Default for StubProofProvider {
    fn default() -> Self {
        Self {
            proves: true,
            confidence: 0.9,
        }
    }
}

#[async_trait]
impl ProofProvider for StubProofProvider {
    async fn prove(&self, _query: &str, domain: &str) -> CortexResult<ProofResult> {
        if self.proves {
            Ok(ProofResult {
                proven: true,
                confidence: self.confidence,
                verifier: "stub".to_string(),
                steps: vec!["assume".to_string(), "derive".to_string()],
                axioms_used: vec!["axiom-1".to_string()],
                error: None,
                proof_tree: None,
            })
        } else {
            Ok(ProofResult::failed("stub", format!("no proof found in domain {domain}")))
        }
    }
}

/// Returns a fixed, configurable set of engrams for any query.
pub struct StubRetriever {
    pub engrams: Mutex<Vec<RetrievedEngram>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl StubRetriever {
    pub fn new(engrams: Vec<RetrievedEngram>) -> Self {
        Self {
            engrams: Mutex::new(engrams),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn search(
        &self,
        _query: &str,
        top_k: usize,
        _cluster: Option<&str>,
        _graph_depth: u32,
    ) -> CortexResult<Vec<RetrievedEngram>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let engrams = self.engrams.lock();
        Ok(engrams.iter().take(top_k).cloned().collect())
    }
}

/// Routes every query to the same fixed cluster id.
pub struct StubRouter {
    pub cluster: String,
}

#[async_trait]
impl Router for StubRouter {
    async fn route(&self, _query: &str, top_k: usize) -> CortexResult<Vec<String>> {
        Ok(std::iter::repeat(self.cluster.clone()).take(top_k.min(1)).collect())
    }
}

/// L2-normalized vectors of fixed length, content-independent.
pub struct StubEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    async fn encode(&self, content: &str, kind: EmbeddingKind) -> CortexResult<Vec<f32>> {
        let len = match kind {
            EmbeddingKind::Text => TEXT_VECTOR_LEN,
            EmbeddingKind::Image => IMAGE_VECTOR_LEN,
        };
        let seed = content.len() as f32 + 1.0;
        let raw: Vec<f32> = (0..len).map(|i| seed + i as f32).collect();
        let norm = raw.iter().map(|v| v * v).sum::<f32>().sqrt();
        Ok(raw.into_iter().map(|v| v / norm).collect())
    }
}

/// Always produces a proposition with a fixed domain and turns a proof
/// back into a high-salience axiom-derived engram, the way `cortex-awake`'s
/// FOCUSED step expects (§4.6).
pub struct StubSemanticBridge {
    pub domain: String,
}

impl Default for StubSemanticBridge {
    fn default() -> Self {
        Self {
            domain: "mathematics".to_string(),
        }
    }
}

#[async_trait]
impl SemanticBridge for StubSemanticBridge {
    async fn engram_to_axiom(&self, engram: &Engram) -> CortexResult<Option<Proposition>> {
        Ok(Some(Proposition {
            statement: engram.content.clone(),
            domain: self.domain.clone(),
        }))
    }

    async fn axiom_to_engram(&self, proof: &ProofResult) -> CortexResult<Engram> {
        let content = proof.steps.join(" -> ");
        let mut metadata = EngramMetadata::new("semantic_bridge");
        metadata.domain = Some(self.domain.clone());
        Ok(Engram::new(uuid_like(&content), content, metadata))
    }
}

/// A deterministic id derived from content, avoiding a `uuid` dependency
/// in this crate just for fixture bookkeeping.
fn uuid_like(content: &str) -> String {
    format!("proof-{}", Engram::hash_content(content).get(..12).unwrap_or_default())
}
