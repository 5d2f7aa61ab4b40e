//! `AwakeEngine` (C6, §4.6): the single background reasoner, cycling
//! through IDLE/THINKING/FOCUSED/DREAMING in response to market
//! allocations, energy, and queue pressure, and SLEEPING once stopped.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use uuid::Uuid;

use cortex_core::config::{AwakeConfig, DecayConfig};
use cortex_core::errors::CortexResult;
use cortex_core::models::{Allocation, Bid, GrantRequest, ResourceKind};
use cortex_core::traits::{
    AwakeControl, BiddingAgent, EngramStore, IterOrder, IterPredicate, LlmProvider, ProofProvider, RetrievedEngram,
    SemanticBridge,
};
use cortex_retrieval::truth_guard;

use crate::bidding::construct_bid;
use crate::mode::{mode_after_allocation, mode_after_energy, AllocationSignal, AwakeMode};
use crate::queue::{WorkloadItem, WorkloadQueue};

const ORPHAN_MIN_QUALITY: f64 = 0.4;
const CONSISTENCY_REROUTE_THRESHOLD: f64 = 0.6;
const PROOF_FAILURE_PENALTY: f64 = 0.2;
const PROOF_FAILURE_FLOOR: f64 = 0.3;
const DERIVED_SALIENCE: f64 = 1.5;

pub struct Collaborators {
    pub store: Arc<dyn EngramStore>,
    pub llm: Arc<dyn LlmProvider>,
    pub proof: Arc<dyn ProofProvider>,
    pub bridge: Arc<dyn SemanticBridge>,
}

pub struct AwakeEngine {
    agent_id: String,
    config: AwakeConfig,
    #[allow(dead_code)]
    decay_config: DecayConfig,
    mode: Mutex<AwakeMode>,
    current_hz: Mutex<f64>,
    queue: WorkloadQueue,
    low_consistency_count: AtomicU32,
    error_count: AtomicU32,
    step_count: AtomicU32,
    running: AtomicBool,
    burst_requested: AtomicBool,
    collaborators: Collaborators,
}

impl AwakeEngine {
    pub fn new(agent_id: impl Into<String>, config: AwakeConfig, decay_config: DecayConfig, collaborators: Collaborators) -> Self {
        let min_hz = config.min_hz;
        Self {
            agent_id: agent_id.into(),
            config,
            decay_config,
            mode: Mutex::new(AwakeMode::Idle),
            current_hz: Mutex::new(min_hz),
            queue: WorkloadQueue::new(),
            low_consistency_count: AtomicU32::new(0),
            error_count: AtomicU32::new(0),
            step_count: AtomicU32::new(0),
            running: AtomicBool::new(true),
            burst_requested: AtomicBool::new(false),
            collaborators,
        }
    }

    pub fn mode(&self) -> AwakeMode {
        *self.mode.lock()
    }

    pub fn current_hz(&self) -> f64 {
        *self.current_hz.lock()
    }

    pub fn queue(&self) -> &WorkloadQueue {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn transition_to(&self, mode: AwakeMode) {
        *self.mode.lock() = mode;
        let hz = mode.base_hz(self.queue.len(), self.config.min_hz, self.config.max_hz);
        *self.current_hz.lock() = hz;
        tracing::debug!(agent = %self.agent_id, ?mode, hz, "awake engine transitioned");
    }

    /// Apply the market's energy level to the mode machine (§4.6); called
    /// once per Heartbeat tick after the market auction resolves.
    pub fn observe_energy(&self, energy_level: f64) {
        let current = self.mode();
        let next = mode_after_energy(current, energy_level);
        if next != current {
            self.transition_to(next);
        }
    }

    /// Run one per-mode step (§4.6's "Per-mode step").
    pub async fn step(&self) -> CortexResult<()> {
        self.step_count.fetch_add(1, Ordering::SeqCst);
        match self.mode() {
            AwakeMode::Idle => self.step_idle().await,
            AwakeMode::Thinking => self.step_thinking().await,
            AwakeMode::Focused => self.step_focused().await,
            AwakeMode::Dreaming => self.step_dreaming().await,
            AwakeMode::Sleeping => {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(())
            }
        }
    }

    async fn step_idle(&self) -> CortexResult<()> {
        self.queue.reap_on_idle_scan();
        let threshold = self.config.uncertainty_threshold;
        let burst = self.burst_requested.swap(false, Ordering::SeqCst);
        let (predicate, limit) = if burst {
            // A metacognitive burst request targets weak-consistency engrams
            // specifically and scans deeper than a routine idle pass.
            (IterPredicate::ConsistencyBelow(0.8), 10)
        } else {
            (
                IterPredicate::QualityBelowOrConsistencyBelow {
                    quality: threshold,
                    consistency: 0.8,
                },
                3,
            )
        };
        let found = self.collaborators.store.iter_by(predicate, IterOrder::QualityAscending, limit).await?;

        if !found.is_empty() {
            for engram in &found {
                if engram.consistency_score() < 0.8 {
                    self.low_consistency_count.fetch_add(1, Ordering::SeqCst);
                }
                self.queue.push(WorkloadItem::new(engram.id.clone(), engram.quality_score()));
            }
            self.transition_to(AwakeMode::Thinking);
        }
        Ok(())
    }

    async fn step_thinking(&self) -> CortexResult<()> {
        let Some(item) = self.queue.pop() else {
            self.transition_to(AwakeMode::Idle);
            return Ok(());
        };
        let Some(mut engram) = self.collaborators.store.get(&item.engram_id).await? else {
            return Ok(());
        };

        if engram.consistency_score() < CONSISTENCY_REROUTE_THRESHOLD {
            self.queue.push(item);
            self.transition_to(AwakeMode::Focused);
            return Ok(());
        }

        let refinement = self.collaborators.llm.refine(&engram.content).await;
        let refined = match refinement {
            Ok(text) => text,
            Err(err) => {
                self.error_count.fetch_add(1, Ordering::SeqCst);
                return Err(err);
            }
        };

        let probe = RetrievedEngram::new(engram.clone(), 0.0);
        let assessment = truth_guard::assess(std::slice::from_ref(&probe));
        let content = if assessment.is_safe {
            refined
        } else {
            format!("[low-confidence] {refined}")
        };
        engram.update_content(content);
        self.collaborators.store.add_or_update(engram).await?;
        Ok(())
    }

    async fn step_focused(&self) -> CortexResult<()> {
        let Some(item) = self.queue.pop() else {
            self.transition_to(AwakeMode::Idle);
            return Ok(());
        };
        let Some(mut engram) = self.collaborators.store.get(&item.engram_id).await? else {
            return Ok(());
        };

        let proposition = self.collaborators.bridge.engram_to_axiom(&engram).await?;
        let Some(proposition) = proposition else {
            engram.set_consistency_score((engram.consistency_score() - PROOF_FAILURE_PENALTY).max(PROOF_FAILURE_FLOOR));
            self.collaborators.store.update_metrics(&engram).await?;
            return Ok(());
        };

        let proof = self
            .collaborators
            .proof
            .prove(&proposition.statement, &proposition.domain)
            .await?;

        if proof.proven {
            let mut child = self.collaborators.bridge.axiom_to_engram(&proof).await?;
            child.set_salience(DERIVED_SALIENCE);
            child.is_axiom_derived = true;
            child.set_consistency_score(1.0);
            child.proof_id = Some(Uuid::new_v4().to_string());
            child.axioms_used = proof.axioms_used.clone();
            child.parent_id = Some(engram.id.clone());
            self.collaborators.store.add_or_update(child).await?;
            engram.set_consistency_score(1.0);
        } else {
            engram.set_consistency_score((engram.consistency_score() - PROOF_FAILURE_PENALTY).max(PROOF_FAILURE_FLOOR));
            self.error_count.fetch_add(1, Ordering::SeqCst);
        }
        self.collaborators.store.update_metrics(&engram).await?;
        Ok(())
    }

    async fn step_dreaming(&self) -> CortexResult<()> {
        self.collaborators.store.prune_orphans(ORPHAN_MIN_QUALITY).await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(())
    }
}

impl BiddingAgent for AwakeEngine {
    fn agent_id(&self) -> &str {
        &self.agent_id
    }

    fn construct_bid(&self) -> (Vec<Bid>, Vec<GrantRequest>) {
        construct_bid(&self.agent_id, self.queue.len(), self.queue.avg_quality())
    }

    fn receive_allocation(&self, allocations: &[Allocation]) {
        let Some(best) = allocations.iter().max_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap()) else {
            return;
        };
        let signal = AllocationSignal {
            resource_is_power_lease: best.resource == ResourceKind::PowerLease,
            amount: best.amount,
        };
        self.transition_to(mode_after_allocation(signal));
    }
}

impl AwakeControl for AwakeEngine {
    fn is_idle(&self) -> bool {
        self.mode() == AwakeMode::Idle
    }

    fn queue_len(&self) -> usize {
        self.queue.len()
    }

    fn low_consistency_count(&self) -> u32 {
        self.low_consistency_count.load(Ordering::SeqCst)
    }

    fn error_rate(&self) -> f64 {
        let steps = self.step_count.load(Ordering::SeqCst).max(1) as f64;
        self.error_count.load(Ordering::SeqCst) as f64 / steps
    }

    /// Flag the next IDLE step to run a wider, consistency-targeted scan
    /// instead of its routine pass (§4.5 step 4: metacognitive feedback).
    fn request_focused_burst(&self) {
        self.burst_requested.store(true, Ordering::SeqCst);
    }

    fn scale_hz(&self, factor: f64) {
        let mut hz = self.current_hz.lock();
        *hz = (*hz * factor).clamp(self.config.min_hz, self.config.max_hz);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        *self.mode.lock() = AwakeMode::Sleeping;
        *self.current_hz.lock() = 0.0;
    }

    fn observe_energy(&self, energy_level: f64) {
        AwakeEngine::observe_energy(self, energy_level);
    }
}
