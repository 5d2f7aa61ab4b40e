//! DeliberationPipeline (C14, §4.14): the single public operation
//! `process_query(raw_query) -> response_string`, and every collaborator
//! it fans out to on the way there.

use std::sync::Arc;

use cortex_core::config::ReasoningConfig;
use cortex_core::errors::CortexResult;
use cortex_core::traits::{
    EmbeddingKind, EmbeddingProvider, EngramStore, LlmProvider, ProofProvider, RetrievedEngram, Retriever, Router,
    SemanticBridge,
};
use cortex_retrieval::{truth_guard, DetectionContext, GateResult, ImpasseDetector, PredictionEngine, TranslatorGate};
use cortex_session::WorkingMemory;

use cortex_consolidation::ReconsolidationEngine;

pub const MAX_DELIBERATIONS: usize = 3;
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;
pub const CONFIDENCE_OK: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionPath {
    FastHonest,
    FastReasoned,
    SymbolicProven,
    SymbolicFailed,
}

#[derive(Debug, Clone)]
pub struct CompetitionResult {
    pub confidence: f64,
    pub content: String,
    pub path: CompetitionPath,
}

struct Attempt {
    retrieved: Vec<RetrievedEngram>,
    winner: CompetitionResult,
    error_magnitude: f64,
}

/// Every external collaborator the pipeline consults, grouped the way
/// `cortex-awake`'s `Collaborators` groups its own.
pub struct PipelineCollaborators {
    pub store: Arc<dyn EngramStore>,
    pub retriever: Arc<dyn Retriever>,
    pub router: Option<Arc<dyn Router>>,
    pub llm: Arc<dyn LlmProvider>,
    pub proof: Arc<dyn ProofProvider>,
    pub bridge: Arc<dyn SemanticBridge>,
    pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct DeliberationPipeline {
    collaborators: PipelineCollaborators,
    gate: TranslatorGate,
    prediction: PredictionEngine,
    reconsolidation: Arc<ReconsolidationEngine>,
    working_memory: Arc<WorkingMemory>,
    impasses: ImpasseDetector,
    reasoning: ReasoningConfig,
    top_k: usize,
}

impl DeliberationPipeline {
    pub fn new(
        collaborators: PipelineCollaborators,
        gate: TranslatorGate,
        reconsolidation: Arc<ReconsolidationEngine>,
        working_memory: Arc<WorkingMemory>,
        reasoning: ReasoningConfig,
        top_k: usize,
    ) -> Self {
        Self {
            collaborators,
            gate,
            prediction: PredictionEngine::new(),
            reconsolidation,
            working_memory,
            impasses: ImpasseDetector::new(),
            reasoning,
            top_k,
        }
    }

    pub fn impasses(&self) -> &ImpasseDetector {
        &self.impasses
    }

    pub fn collaborators(&self) -> &PipelineCollaborators {
        &self.collaborators
    }

    /// `process_query(raw_query) -> response_string` (§4.14), plus the
    /// winning attempt's retrieved set so a caller can act on it with
    /// `user_feedback_helpful/wrong` (§6).
    pub async fn process_query(&self, raw_query: &str) -> CortexResult<(String, Vec<RetrievedEngram>)> {
        let filtered = self.gate.filter(raw_query).await?;
        if let Some(clarification) = self.gate_rejection(raw_query, &filtered) {
            return Ok((clarification, Vec::new()));
        }

        let clean = filtered.content.clone();
        let mut current_query = clean.clone();
        let mut best: Option<Attempt> = None;

        for attempt_idx in 0..MAX_DELIBERATIONS {
            let graph_depth = if attempt_idx == 0 { 1 } else { 0 };
            let cluster = self.route(&current_query).await;
            let retrieved = self
                .collaborators
                .retriever
                .search(&current_query, self.top_k, cluster.as_deref(), graph_depth)
                .await?;

            let wm_context = self.working_memory.get_context();
            let prediction = self.prediction.predict(&current_query, &retrieved);

            for e in &retrieved {
                self.reconsolidation.open_window(&e.engram.id, &current_query);
            }

            let winner = self.compete(&current_query, &wm_context, &retrieved).await?;

            let error = self
                .prediction
                .compute_error(&current_query, &prediction, &winner.content, winner.confidence, &domain(&current_query));

            let is_better = best
                .as_ref()
                .map(|b| winner.confidence > b.winner.confidence)
                .unwrap_or(true);
            if is_better {
                best = Some(Attempt {
                    retrieved: retrieved.clone(),
                    winner: winner.clone(),
                    error_magnitude: error.error_magnitude,
                });
            }

            if winner.confidence >= CONFIDENCE_OK && error.error_magnitude < CONFIDENCE_THRESHOLD {
                break;
            }

            current_query = self.refine_query(&clean, &current_query, &retrieved, error.error_magnitude, attempt_idx, &winner);
        }

        let best = best.expect("at least one deliberation attempt always runs");

        let successful = best.winner.confidence > CONFIDENCE_OK;
        for e in &best.retrieved {
            let mut engram = e.engram.clone();
            if self
                .reconsolidation
                .evaluate_and_modify(&mut engram, &clean, best.winner.confidence, best.error_magnitude)
                .is_err()
            {
                tracing::trace!(engram_id = %engram.id, "reconsolidation window already closed for this attempt");
            }
            engram.record_usage(successful);
            self.collaborators.store.update_metrics(&engram).await?;
        }

        self.working_memory.update(&clean, &best.retrieved, cortex_session::DEFAULT_MIN_RELEVANCE);

        let dom = domain(&clean);
        if best.winner.confidence < CONFIDENCE_OK {
            let ctx = DetectionContext {
                confidence: best.winner.confidence,
                engrams_found: best.retrieved.len(),
                gate_confidence: filtered.gate_confidence,
                proof_result: None,
            };
            self.impasses.classify_and_record(&clean, &dom, &ctx);
        }

        Ok((best.winner.content, best.retrieved))
    }

    fn gate_rejection(&self, raw_query: &str, filtered: &GateResult) -> Option<String> {
        if filtered.needs_clarification && filtered.gate_confidence < 0.4 {
            let ctx = DetectionContext {
                confidence: 0.0,
                engrams_found: 0,
                gate_confidence: filtered.gate_confidence,
                proof_result: None,
            };
            self.impasses
                .classify_and_record(raw_query, &domain(raw_query), &ctx);
            return Some(format!(
                "I need a clearer question before I can answer \"{raw_query}\" — could you rephrase it?"
            ));
        }
        None
    }

    async fn route(&self, query: &str) -> Option<String> {
        let router = self.collaborators.router.as_ref()?;
        router.route(query, 1).await.ok()?.into_iter().next()
    }

    /// Winner-take-all between a fast LLM path and a symbolic proof path,
    /// run concurrently (§4.14 step f, §5 scheduling model).
    async fn compete(
        &self,
        query: &str,
        wm_context: &[cortex_core::models::MemoryItem],
        retrieved: &[RetrievedEngram],
    ) -> CortexResult<CompetitionResult> {
        let assessment = truth_guard::assess(retrieved);
        let wants_symbolic = self.reasoning.enabled && wants_symbolic_routing(query);

        let fast = self.fast_path(query, wm_context, retrieved, &assessment);
        let symbolic = self.symbolic_path(query, wants_symbolic);

        let (fast, symbolic) = tokio::join!(fast, symbolic);
        let fast = fast?;
        let symbolic = symbolic?;

        Ok(if symbolic.confidence > fast.confidence { symbolic } else { fast })
    }

    async fn fast_path(
        &self,
        query: &str,
        wm_context: &[cortex_core::models::MemoryItem],
        retrieved: &[RetrievedEngram],
        assessment: &truth_guard::RiskAssessment,
    ) -> CortexResult<CompetitionResult> {
        if let Some(forced) = truth_guard::enforce_honest_response(retrieved, assessment) {
            return Ok(CompetitionResult {
                confidence: 0.2,
                content: forced,
                path: CompetitionPath::FastHonest,
            });
        }

        let context = render_context(wm_context, retrieved);
        let content = self.collaborators.llm.reason(query, &context).await?;
        let avg_quality = if retrieved.is_empty() {
            0.5
        } else {
            retrieved.iter().map(|r| r.engram.quality_score()).sum::<f64>() / retrieved.len() as f64
        };
        let confidence = (1.0 - assessment.risk) * avg_quality;
        Ok(CompetitionResult {
            confidence,
            content,
            path: CompetitionPath::FastReasoned,
        })
    }

    async fn symbolic_path(&self, query: &str, wants_symbolic: bool) -> CortexResult<CompetitionResult> {
        if !wants_symbolic {
            return Ok(CompetitionResult {
                confidence: 0.0,
                content: String::new(),
                path: CompetitionPath::SymbolicFailed,
            });
        }

        let dom = domain(query);
        let proof = self.collaborators.proof.prove(query, &dom).await?;
        if !proof.proven {
            return Ok(CompetitionResult {
                confidence: 0.0,
                content: String::new(),
                path: CompetitionPath::SymbolicFailed,
            });
        }

        let mut child = self.collaborators.bridge.axiom_to_engram(&proof).await?;
        child.is_axiom_derived = true;
        child.set_consistency_score(1.0);
        child.axioms_used = proof.axioms_used.clone();
        let _vector = self.collaborators.embedding.encode(&child.content, EmbeddingKind::Text).await?;
        let content = child.content.clone();
        self.collaborators.store.add_or_update(child).await?;

        Ok(CompetitionResult {
            confidence: proof.confidence,
            content,
            path: CompetitionPath::SymbolicProven,
        })
    }

    /// Step j's refinement ladder, in priority order.
    fn refine_query(
        &self,
        original: &str,
        current: &str,
        retrieved: &[RetrievedEngram],
        error_magnitude: f64,
        attempt_idx: usize,
        winner: &CompetitionResult,
    ) -> String {
        if retrieved.len() < 2 {
            return original.to_string();
        }
        if error_magnitude > 0.7 {
            let tokens: Vec<&str> = winner.content.split_whitespace().take(5).collect();
            if !tokens.is_empty() {
                return format!("{current} {}", tokens.join(" "));
            }
        }
        if attempt_idx == 1 {
            return format!("Explain: {original}");
        }
        original.to_string()
    }
}

fn render_context(wm_context: &[cortex_core::models::MemoryItem], retrieved: &[RetrievedEngram]) -> String {
    let mut out = String::new();
    for item in wm_context {
        out.push_str(&item.truncated_content);
        out.push('\n');
    }
    for r in retrieved {
        out.push_str(&r.engram.content);
        out.push('\n');
    }
    out
}

fn domain(query: &str) -> String {
    cortex_retrieval::infer_domain(query)
}

/// Symbolic/hybrid routing cue, reusing the same keyword vocabulary
/// `ImpasseDetector::infer_domain` classifies on: mathematics and logic
/// queries are the ones worth a proof attempt.
fn wants_symbolic_routing(query: &str) -> bool {
    matches!(domain(query).as_str(), "mathematics" | "logic")
}
