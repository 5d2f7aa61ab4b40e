//! MemoryItem: a single entry in the fixed-capacity WorkingMemory buffer (§4.13).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engram::clamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub engram_id: String,
    pub truncated_content: String,
    relevance: f64,
    pub quality: f64,
    pub added_at: DateTime<Utc>,
    pub access_count: u32,
    pub source_query: String,
}

/// Truncate a content string to a display-friendly prefix, the way the
/// teacher truncates context snippets for working memory.
pub const TRUNCATE_CHARS: usize = 200;

impl MemoryItem {
    pub fn new(
        engram_id: impl Into<String>,
        content: &str,
        relevance: f64,
        quality: f64,
        source_query: impl Into<String>,
    ) -> Self {
        let truncated_content: String = content.chars().take(TRUNCATE_CHARS).collect();
        Self {
            engram_id: engram_id.into(),
            truncated_content,
            relevance: clamp(relevance, 0.0, 1.0),
            quality: clamp(quality, 0.0, 1.0),
            added_at: Utc::now(),
            access_count: 0,
            source_query: source_query.into(),
        }
    }

    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    pub fn set_relevance(&mut self, value: f64) {
        self.relevance = clamp(value, 0.0, 1.0);
    }

    pub fn bump_access(&mut self) {
        self.access_count += 1;
    }

    /// `priority = 0.4*relevance + 0.3*quality + 0.2*recency + 0.1*min(access/10, 1)` (§4.13).
    pub fn priority(&self, now: DateTime<Utc>) -> f64 {
        let age_seconds = (now - self.added_at).num_seconds().max(0) as f64;
        let recency = (1.0 - age_seconds / 300.0).max(0.0);
        let access_term = (self.access_count as f64 / 10.0).min(1.0);
        0.4 * self.relevance + 0.3 * self.quality + 0.2 * recency + 0.1 * access_term
    }
}
