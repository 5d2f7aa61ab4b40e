//! ReconsolidationWindow: a short interval after retrieval during which an
//! engram may be strengthened, weakened, or marked for refinement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconsolidationModification {
    pub description: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconsolidationWindow {
    pub engram_id: String,
    pub triggering_query: String,
    pub opened_at: DateTime<Utc>,
    pub window_duration_seconds: i64,
    pub modifications: Vec<ReconsolidationModification>,
    pub closed: bool,
}

impl ReconsolidationWindow {
    pub fn open(engram_id: impl Into<String>, query: impl Into<String>, window_duration_seconds: i64) -> Self {
        Self {
            engram_id: engram_id.into(),
            triggering_query: query.into(),
            opened_at: Utc::now(),
            window_duration_seconds,
            modifications: Vec::new(),
            closed: false,
        }
    }

    /// `!closed && now - opened_at < duration` (§3).
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        !self.closed && (now - self.opened_at).num_seconds() < self.window_duration_seconds
    }

    pub fn record(&mut self, description: impl Into<String>) {
        self.modifications.push(ReconsolidationModification {
            description: description.into(),
            at: Utc::now(),
        });
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}
