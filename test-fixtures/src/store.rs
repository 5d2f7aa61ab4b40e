//! `InMemoryEngramStore`: the reference `EngramStore` backing integration
//! tests, with orphan pruning and delete-cascade grounded on `cortex-causal`.

use async_trait::async_trait;
use dashmap::DashMap;

use cortex_causal::{cascade_unlink, select_prune_candidates, LinkGraph};
use cortex_core::errors::{CortexResult, StorageError};
use cortex_core::models::Engram;
use cortex_core::traits::{EngramStore, IterOrder, IterPredicate};

#[derive(Default)]
pub struct InMemoryEngramStore {
    engrams: DashMap<String, Engram>,
    by_hash: DashMap<String, String>,
}

impl InMemoryEngramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.engrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engrams.is_empty()
    }
}

#[async_trait]
impl EngramStore for InMemoryEngramStore {
    async fn add_or_update(&self, engram: Engram) -> CortexResult<()> {
        self.by_hash.insert(engram.content_hash.clone(), engram.id.clone());
        self.engrams.insert(engram.id.clone(), engram);
        Ok(())
    }

    async fn get(&self, id: &str) -> CortexResult<Option<Engram>> {
        Ok(self.engrams.get(id).map(|e| e.clone()))
    }

    async fn get_by_content_hash(&self, hash: &str) -> CortexResult<Option<Engram>> {
        let Some(id) = self.by_hash.get(hash).map(|id| id.clone()) else {
            return Ok(None);
        };
        Ok(self.engrams.get(&id).map(|e| e.clone()))
    }

    async fn update_metrics(&self, engram: &Engram) -> CortexResult<()> {
        if !self.engrams.contains_key(&engram.id) {
            return Err(StorageError::NotFound { id: engram.id.clone() }.into());
        }
        self.engrams.insert(engram.id.clone(), engram.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CortexResult<()> {
        if let Some((_, removed)) = self.engrams.remove(id) {
            self.by_hash.remove(&removed.content_hash);
            for mut entry in self.engrams.iter_mut() {
                cascade_unlink(std::iter::once(entry.value_mut()), id);
            }
        }
        Ok(())
    }

    /// Rebuilds the link graph fresh, selects prune candidates via
    /// orphan-protection, and cascades the removal through every remaining
    /// engram's links before deleting (§3 orphan protection).
    async fn prune_orphans(&self, min_quality: f64) -> CortexResult<u64> {
        let snapshot: Vec<Engram> = self.engrams.iter().map(|e| e.value().clone()).collect();
        let mut graph = LinkGraph::new();
        graph.sync(snapshot.iter());

        let candidates = select_prune_candidates(&snapshot, &graph, min_quality);
        if candidates.is_empty() {
            return Ok(0);
        }

        for id in &candidates {
            if let Some((_, removed)) = self.engrams.remove(id) {
                self.by_hash.remove(&removed.content_hash);
            }
        }

        for mut entry in self.engrams.iter_mut() {
            for id in &candidates {
                cascade_unlink(std::iter::once(entry.value_mut()), id);
            }
        }

        Ok(candidates.len() as u64)
    }

    async fn iter_by(&self, predicate: IterPredicate, order_by: IterOrder, limit: usize) -> CortexResult<Vec<Engram>> {
        let mut items: Vec<Engram> = self
            .engrams
            .iter()
            .map(|e| e.value().clone())
            .filter(|e| matches_predicate(e, &predicate))
            .collect();

        match order_by {
            IterOrder::QualityAscending => {
                items.sort_by(|a, b| a.quality_score().partial_cmp(&b.quality_score()).unwrap())
            }
            IterOrder::DecayDescending => items.sort_by(|a, b| b.decay_score().partial_cmp(&a.decay_score()).unwrap()),
            IterOrder::LastUsedAscending => items.sort_by(|a, b| a.last_used.cmp(&b.last_used)),
        }
        items.truncate(limit);
        Ok(items)
    }

    async fn add_link(&self, source: &str, target: &str, link_type: &str, weight: f64) -> CortexResult<()> {
        let Some(mut engram) = self.engrams.get_mut(source) else {
            return Err(StorageError::NotFound { id: source.to_string() }.into());
        };
        engram.add_link(target, link_type, weight);
        Ok(())
    }
}

fn matches_predicate(e: &Engram, predicate: &IterPredicate) -> bool {
    match predicate {
        IterPredicate::QualityBelow(q) => e.quality_score() < *q,
        IterPredicate::ConsistencyBelow(c) => e.consistency_score() < *c,
        IterPredicate::QualityBelowOrConsistencyBelow { quality, consistency } => {
            e.quality_score() < *quality || e.consistency_score() < *consistency
        }
        IterPredicate::DecayAbove(d) => e.decay_score() > *d,
        IterPredicate::ClusterTag(tag) => &e.cluster_tag == tag,
        IterPredicate::All => true,
    }
}
