//! `CoreHandle`: wires every subsystem together and exposes the public API
//! (§6) an external caller (HTTP surface, CLI — both out of scope here)
//! would sit in front of.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use cortex_awake::AwakeEngine;
use cortex_core::config::CortexConfig;
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::models::{BrainSnapshot, Engram, EngramMetadata};
use cortex_core::traits::{AwakeControl, EngramStore, RetrievedEngram};
use cortex_consolidation::{user_feedback_helpful, user_feedback_wrong, ReconsolidationEngine};
use cortex_heartbeat::Heartbeat;
use cortex_market::Market;
use cortex_retrieval::truth_guard;

use crate::pipeline::DeliberationPipeline;

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub engram_id: String,
    pub created: bool,
    pub consistency_checked: bool,
}

pub struct CoreHandle {
    pub config: CortexConfig,
    pub store: Arc<dyn EngramStore>,
    pub market: Arc<RwLock<Market>>,
    pub awake: Arc<AwakeEngine>,
    pub heartbeat: Arc<Heartbeat>,
    pub reconsolidation: Arc<ReconsolidationEngine>,
    pub pipeline: DeliberationPipeline,
    last_retrieved: Mutex<Vec<RetrievedEngram>>,
}

impl CoreHandle {
    pub fn new(
        config: CortexConfig,
        store: Arc<dyn EngramStore>,
        market: Arc<RwLock<Market>>,
        awake: Arc<AwakeEngine>,
        heartbeat: Arc<Heartbeat>,
        reconsolidation: Arc<ReconsolidationEngine>,
        pipeline: DeliberationPipeline,
    ) -> Self {
        Self {
            config,
            store,
            market,
            awake,
            heartbeat,
            reconsolidation,
            pipeline,
            last_retrieved: Mutex::new(Vec::new()),
        }
    }

    pub async fn process_query(&self, raw_query: &str) -> CortexResult<String> {
        let (response, retrieved) = self.pipeline.process_query(raw_query).await?;
        *self.last_retrieved.lock() = retrieved;
        Ok(response)
    }

    /// `ingest(raw, source) -> IngestResult` (§6): gate-filter, retrieve
    /// context, compress via LLM, upsert; if newly created, run a
    /// consistency check via proof and attach the axioms it used.
    pub async fn ingest(&self, raw: &str, source: &str) -> CortexResult<IngestResult> {
        let content_hash = Engram::hash_content(raw);
        if let Some(existing) = self.store.get_by_content_hash(&content_hash).await? {
            return Ok(IngestResult {
                engram_id: existing.id,
                created: false,
                consistency_checked: false,
            });
        }

        let filtered = self.pipeline.collaborators().llm.compress(raw, source).await?;
        let metadata = EngramMetadata::new(source);
        let mut engram = Engram::new(Uuid::new_v4().to_string(), filtered, metadata);

        let mut consistency_checked = false;
        if let Some(proposition) = self.pipeline.collaborators().bridge.engram_to_axiom(&engram).await? {
            let proof = self
                .pipeline
                .collaborators()
                .proof
                .prove(&proposition.statement, &proposition.domain)
                .await?;
            consistency_checked = true;
            if proof.proven {
                engram.set_consistency_score(1.0);
                engram.axioms_used = proof.axioms_used;
                engram.proof_id = Some(Uuid::new_v4().to_string());
            }
        }

        let engram_id = engram.id.clone();
        self.store.add_or_update(engram).await?;
        Ok(IngestResult {
            engram_id,
            created: true,
            consistency_checked,
        })
    }

    /// `user_feedback_helpful()` (§6): acts on the last query's retrieved
    /// set, strengthening each engram and raising `integrity_score`.
    pub async fn user_feedback_helpful(&self) -> CortexResult<()> {
        self.apply_feedback(true).await
    }

    /// `user_feedback_wrong()` (§6): the 5x loss-aversion counterpart.
    pub async fn user_feedback_wrong(&self) -> CortexResult<()> {
        self.apply_feedback(false).await
    }

    async fn apply_feedback(&self, helpful: bool) -> CortexResult<()> {
        let retrieved = self.last_retrieved.lock().clone();
        for r in retrieved {
            let mut engram = r.engram;
            if helpful {
                user_feedback_helpful(&self.reconsolidation, &mut engram);
            } else {
                user_feedback_wrong(&self.reconsolidation, &mut engram);
            }
            self.store.update_metrics(&engram).await?;
        }
        Ok(())
    }

    /// `set_salience(engram_id, value)` (§6): clamp and persist.
    pub async fn set_salience(&self, engram_id: &str, value: f64) -> CortexResult<()> {
        let mut engram = self
            .store
            .get(engram_id)
            .await?
            .ok_or_else(|| CortexError::EngramNotFound { id: engram_id.to_string() })?;
        engram.set_salience(value);
        self.store.update_metrics(&engram).await
    }

    /// `get_brain_status()` (§6): the latest snapshot plus per-component stats.
    pub fn get_brain_status(&self) -> Option<BrainSnapshot> {
        self.heartbeat.get_current()
    }

    pub fn is_halted(&self) -> bool {
        self.awake.is_idle() && self.get_brain_status().map(|s| s.halted).unwrap_or(false)
    }
}

/// Exposed for callers (e.g. an HTTP surface) that want to show a
/// confidence indicator for a retrieved set before acting on it.
pub fn assess_retrieved_risk(retrieved: &[RetrievedEngram]) -> f64 {
    truth_guard::assess(retrieved).risk
}
