//! `EngramStore`: persistence + hash lookup + update fast-path (§6).
//!
//! The persistent SQL/KV backend behind this trait is an out-of-scope
//! external collaborator; the core only ever talks through this interface.
//! A small in-memory reference implementation lives in `test-fixtures` for
//! exercising the rest of the core without a real database.

use async_trait::async_trait;

use crate::errors::CortexResult;
use crate::models::Engram;

/// A predicate over an engram used by `iter_by`. Kept as a closed set of
/// named predicates (rather than an arbitrary boxed closure) so the trait
/// stays object-safe and a real backend can translate each variant into a
/// SQL `WHERE` clause instead of a full table scan.
#[derive(Debug, Clone)]
pub enum IterPredicate {
    QualityBelow(f64),
    ConsistencyBelow(f64),
    QualityBelowOrConsistencyBelow { quality: f64, consistency: f64 },
    DecayAbove(f64),
    ClusterTag(Option<String>),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterOrder {
    QualityAscending,
    DecayDescending,
    LastUsedAscending,
}

#[async_trait]
pub trait EngramStore: Send + Sync {
    /// Upsert by `(id, version)`; idempotent.
    async fn add_or_update(&self, engram: Engram) -> CortexResult<()>;

    async fn get(&self, id: &str) -> CortexResult<Option<Engram>>;

    async fn get_by_content_hash(&self, hash: &str) -> CortexResult<Option<Engram>>;

    /// Fast path: mutate only the hot numeric fields without a full rewrite.
    async fn update_metrics(&self, engram: &Engram) -> CortexResult<()>;

    async fn delete(&self, id: &str) -> CortexResult<()>;

    /// Prune orphaned, low-quality engrams; never removes the last member
    /// of a non-noise cluster (§3 orphan protection). Returns count removed.
    async fn prune_orphans(&self, min_quality: f64) -> CortexResult<u64>;

    async fn iter_by(
        &self,
        predicate: IterPredicate,
        order_by: IterOrder,
        limit: usize,
    ) -> CortexResult<Vec<Engram>>;

    /// Upsert a link on the owning engram (§9: links are a relation keyed
    /// by ids, never an in-memory pointer graph).
    async fn add_link(&self, source: &str, target: &str, link_type: &str, weight: f64) -> CortexResult<()>;
}
