//! Impasse: a typed failure plus the sub-goal whose completion resolves it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engram::clamp;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImpasseType {
    NoAxioms,
    LowConfidence,
    Contradiction,
    NoEngrams,
    ProofFailed,
    GateRejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Impasse {
    pub id: String,
    pub original_query: String,
    pub impasse_type: ImpasseType,
    pub failure_reason: String,
    pub sub_goal: String,
    pub domain: String,
    priority: f64,
    pub created_at: DateTime<Utc>,
    pub resolved: bool,
    pub attempts: u32,
}

impl Impasse {
    pub const MAX_ATTEMPTS: u32 = 5;
    /// Duplicate suppression window (§4.11).
    pub const DEDUP_WINDOW_HOURS: i64 = 1;
    /// Staleness prune window (§4.11).
    pub const STALE_HOURS: i64 = 48;

    pub fn new(
        id: impl Into<String>,
        original_query: impl Into<String>,
        impasse_type: ImpasseType,
        failure_reason: impl Into<String>,
        sub_goal: impl Into<String>,
        domain: impl Into<String>,
        priority: f64,
    ) -> Self {
        Self {
            id: id.into(),
            original_query: original_query.into(),
            impasse_type,
            failure_reason: failure_reason.into(),
            sub_goal: sub_goal.into(),
            domain: domain.into(),
            priority: clamp(priority, 0.0, 1.0),
            created_at: Utc::now(),
            resolved: false,
            attempts: 1,
        }
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Same `(type, domain)` seen again within the dedup window: bump
    /// `attempts` and nudge priority up instead of creating a duplicate.
    pub fn bump_duplicate(&mut self) {
        self.attempts += 1;
        self.priority = clamp(self.priority + 0.1, 0.0, 1.0);
    }

    pub fn is_duplicate_of(&self, impasse_type: ImpasseType, domain: &str, now: DateTime<Utc>) -> bool {
        self.impasse_type == impasse_type
            && self.domain == domain
            && (now - self.created_at).num_hours() < Self::DEDUP_WINDOW_HOURS
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.attempts >= Self::MAX_ATTEMPTS || (now - self.created_at).num_hours() > Self::STALE_HOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_within_window_bumps_attempts_and_priority() {
        let mut i = Impasse::new("i1", "q", ImpasseType::NoEngrams, "none found", "acquire", "general", 0.7);
        assert!(i.is_duplicate_of(ImpasseType::NoEngrams, "general", Utc::now()));
        i.bump_duplicate();
        assert_eq!(i.attempts, 2);
        assert!((i.priority() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn priority_caps_at_one() {
        let mut i = Impasse::new("i1", "q", ImpasseType::NoAxioms, "r", "s", "physics", 0.95);
        i.bump_duplicate();
        assert!(i.priority() <= 1.0);
    }
}
