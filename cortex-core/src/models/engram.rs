//! Engram: the core persistent unit, and its directed, typed, weighted links.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clamp a value into `[lo, hi]`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Bounded extension map replacing the source's free-form `metadata: Dict`.
///
/// At most 16 entries, each value capped at 256 bytes; extra insertions are
/// silently dropped rather than erroring, since metadata is advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngramMetadata {
    pub source: String,
    pub domain: Option<String>,
    pub original_length: Option<u32>,
    #[serde(default)]
    extra: BTreeMap<String, String>,
}

impl EngramMetadata {
    pub const MAX_EXTRA_ENTRIES: usize = 16;
    pub const MAX_VALUE_BYTES: usize = 256;

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            domain: None,
            original_length: None,
            extra: BTreeMap::new(),
        }
    }

    /// Insert into the bounded extension map. No-op once the cap is reached.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.extra.len() >= Self::MAX_EXTRA_ENTRIES {
            return;
        }
        let mut value = value.into();
        value.truncate(Self::MAX_VALUE_BYTES);
        self.extra.insert(key.into(), value);
    }

    pub fn get_extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// One entry in an engram's verification history (§3).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationEntry {
    pub action: VerificationAction,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationAction {
    Verified,
    Falsified,
    Disputed,
    Corroborated,
}

/// A directed, typed, weighted link from one engram to another.
///
/// Uniqueness is by `(target, link_type)` from the owning engram's point of
/// view; re-adding an existing `(target, link_type)` pair upserts the
/// weight and is not an error (§9 open question: duplicate-link policy).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub target: String,
    pub link_type: String,
    pub weight: f64,
}

impl Link {
    pub fn new(target: impl Into<String>, link_type: impl Into<String>, weight: f64) -> Self {
        Self {
            target: target.into(),
            link_type: link_type.into(),
            weight: weight.max(0.0),
        }
    }
}

/// The core persistent unit (§3). All scalar fields that the spec declares
/// "always clamped" expose only constructor/mutator paths that clamp them;
/// direct field mutation is possible within the crate family but every
/// setter re-clamps, so no code path can leave an engram out of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engram {
    pub id: String,
    pub version: u64,
    pub content: String,
    pub content_hash: String,
    pub cluster_tag: Option<String>,
    pub metadata: EngramMetadata,
    pub links: Vec<Link>,
    pub source_chunks: Vec<String>,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,

    salience: f64,
    quality_score: f64,
    pub usage_count: u64,
    pub successful_application_count: u64,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub compression_ratio: f64,
    accuracy_preserved: f64,
    pub reuse_contexts: u32,
    decay_score: f64,
    pub is_axiom_derived: bool,
    pub proof_id: Option<String>,
    consistency_score: f64,
    pub axioms_used: Vec<String>,
    integrity_score: f64,
    pub verification_history: Vec<VerificationEntry>,
}

/// Salience is clamped to `[0.5, 2.0]`; every other normalized score to `[0, 1]`.
pub const SALIENCE_MIN: f64 = 0.5;
pub const SALIENCE_MAX: f64 = 2.0;

impl Engram {
    /// Compute the content hash used for duplicate detection (§3 invariant:
    /// identical content never produces a second engram).
    pub fn hash_content(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Construct a freshly ingested engram. `created_at`/`last_used` are set
    /// once here and never mutated afterwards (§3 invariant).
    pub fn new(id: impl Into<String>, content: impl Into<String>, metadata: EngramMetadata) -> Self {
        let content = content.into();
        let content_hash = Self::hash_content(&content);
        let now = Utc::now();
        Self {
            id: id.into(),
            version: 1,
            content,
            content_hash,
            cluster_tag: None,
            metadata,
            links: Vec::new(),
            source_chunks: Vec::new(),
            parent_id: None,
            child_ids: Vec::new(),
            salience: 1.0,
            quality_score: 0.5,
            usage_count: 0,
            successful_application_count: 0,
            last_used: now,
            created_at: now,
            compression_ratio: 1.0,
            accuracy_preserved: 1.0,
            reuse_contexts: 0,
            decay_score: 0.0,
            is_axiom_derived: false,
            proof_id: None,
            consistency_score: 1.0,
            axioms_used: Vec::new(),
            integrity_score: 0.5,
            verification_history: Vec::new(),
        }
    }

    pub fn salience(&self) -> f64 {
        self.salience
    }

    pub fn set_salience(&mut self, value: f64) {
        self.salience = clamp(value, SALIENCE_MIN, SALIENCE_MAX);
    }

    pub fn quality_score(&self) -> f64 {
        self.quality_score
    }

    pub fn set_quality_score(&mut self, value: f64) {
        self.quality_score = clamp(value, 0.0, 1.0);
    }

    pub fn accuracy_preserved(&self) -> f64 {
        self.accuracy_preserved
    }

    pub fn set_accuracy_preserved(&mut self, value: f64) {
        self.accuracy_preserved = clamp(value, 0.0, 1.0);
    }

    pub fn decay_score(&self) -> f64 {
        self.decay_score
    }

    pub fn set_decay_score(&mut self, value: f64) {
        self.decay_score = clamp(value, 0.0, 1.0);
    }

    pub fn consistency_score(&self) -> f64 {
        self.consistency_score
    }

    pub fn set_consistency_score(&mut self, value: f64) {
        self.consistency_score = clamp(value, 0.0, 1.0);
    }

    pub fn integrity_score(&self) -> f64 {
        self.integrity_score
    }

    pub fn set_integrity_score(&mut self, value: f64) {
        self.integrity_score = clamp(value, 0.0, 1.0);
    }

    /// Replace content, bumping the content hash and version (§3 invariant:
    /// version increases by exactly 1 on every content update).
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.content_hash = Self::hash_content(&self.content);
        self.version += 1;
    }

    /// Record a use of this engram (§3 lifecycle: mutated by `record_usage`).
    pub fn record_usage(&mut self, successful: bool) {
        self.usage_count += 1;
        if successful {
            self.successful_application_count += 1;
        }
        self.last_used = Utc::now();
    }

    /// Upsert a link by `(target, link_type)`, replacing the weight if it
    /// already exists (§9: duplicate-link policy is upsert, preserved here).
    pub fn add_link(&mut self, target: impl Into<String>, link_type: impl Into<String>, weight: f64) {
        let target = target.into();
        let link_type = link_type.into();
        if let Some(existing) = self
            .links
            .iter_mut()
            .find(|l| l.target == target && l.link_type == link_type)
        {
            existing.weight = weight.max(0.0);
        } else {
            self.links.push(Link::new(target, link_type, weight));
        }
    }

    pub fn remove_links_to(&mut self, target: &str) {
        self.links.retain(|l| l.target != target);
    }

    pub fn append_verification(&mut self, action: VerificationAction, source: impl Into<String>) {
        self.verification_history.push(VerificationEntry {
            action,
            source: source.into(),
            timestamp: Utc::now(),
        });
    }

    /// Whether this engram is the last surviving member of a non-noise
    /// cluster — such nodes are never pruned (§3 orphan protection).
    pub fn is_last_cluster_member(&self, cluster_size_after_removal: usize) -> bool {
        self.cluster_tag.is_some() && cluster_size_after_removal == 0
    }
}
