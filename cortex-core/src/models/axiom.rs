//! Axiom: opaque (to the core) unit used only by the proof collaborator.
//! The core never inspects `formula`; it only threads axiom ids through.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxiomSource {
    Manual,
    Derived,
    Foundational,
    Learned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axiom {
    pub id: String,
    pub formula: String,
    pub domain: String,
    pub confidence: f64,
    pub version: u64,
    pub source: AxiomSource,
    pub metadata: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub usage_count: u64,
}
