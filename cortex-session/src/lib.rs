//! # cortex-session
//!
//! `WorkingMemory` (C13, §4.13): the fixed-capacity buffer of `MemoryItem`s
//! that survives across a session's queries and is always injected into
//! deliberation as extra context.

use chrono::Utc;
use parking_lot::Mutex;
use tracing::trace;

use cortex_core::config::WorkingMemoryConfig;
use cortex_core::models::MemoryItem;
use cortex_core::traits::RetrievedEngram;

/// Default floor below which a newly retrieved engram is dropped unless
/// its quality compensates (§4.13).
pub const DEFAULT_MIN_RELEVANCE: f64 = 0.3;
const QUALITY_COMPENSATION_FLOOR: f64 = 0.6;

pub struct WorkingMemory {
    config: WorkingMemoryConfig,
    items: Mutex<Vec<MemoryItem>>,
}

impl WorkingMemory {
    pub fn new(config: WorkingMemoryConfig) -> Self {
        Self {
            config,
            items: Mutex::new(Vec::with_capacity(config.capacity)),
        }
    }

    /// `update(query, retrieved, min_relevance=0.3)` (§4.13).
    pub fn update(&self, query: &str, retrieved: &[RetrievedEngram], min_relevance: f64) {
        let mut items = self.items.lock();

        for r in retrieved {
            let normalized = normalized_relevance(r.rerank_score);

            if let Some(existing) = items.iter_mut().find(|i| i.engram_id == r.engram.id) {
                existing.bump_access();
                if normalized > existing.relevance() {
                    existing.set_relevance(normalized);
                }
                continue;
            }

            if normalized < min_relevance && r.engram.quality_score() < QUALITY_COMPENSATION_FLOOR {
                trace!(engram_id = %r.engram.id, normalized, "skipping low-relevance, low-quality engram");
                continue;
            }

            let item = MemoryItem::new(
                r.engram.id.clone(),
                &r.engram.content,
                normalized,
                r.engram.quality_score(),
                query,
            );

            if items.len() >= self.config.capacity {
                evict_lowest_priority(&mut items);
            }
            items.push(item);
        }
    }

    /// `get_context()`: items sorted by priority, highest first (§4.13).
    pub fn get_context(&self) -> Vec<MemoryItem> {
        let now = Utc::now();
        let mut items = self.items.lock().clone();
        items.sort_by(|a, b| b.priority(now).partial_cmp(&a.priority(now)).unwrap());
        items
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

/// `relevance = clamp((rerank+5)/10, 0, 1)` (§4.13).
fn normalized_relevance(rerank_score: f64) -> f64 {
    ((rerank_score + 5.0) / 10.0).clamp(0.0, 1.0)
}

fn evict_lowest_priority(items: &mut Vec<MemoryItem>) {
    let now = Utc::now();
    if let Some((idx, _)) = items
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.priority(now).partial_cmp(&b.priority(now)).unwrap())
    {
        items.remove(idx);
    }
}
