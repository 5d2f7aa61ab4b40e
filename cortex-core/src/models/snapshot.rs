//! BrainSnapshot: an immutable, timestamped record of per-tick metrics
//! collected from every registered component (§4.5).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single component's contribution to a tick's snapshot. `metrics` is a
/// small numeric bag so components don't need a bespoke variant each.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ComponentStatus {
    pub name: String,
    pub metrics: BTreeMap<String, f64>,
    pub error_count: u32,
}

impl ComponentStatus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: BTreeMap::new(),
            error_count: 0,
        }
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainSnapshot {
    pub taken_at: DateTime<Utc>,
    pub components: Vec<ComponentStatus>,
    pub halted: bool,
    pub halt_reason: Option<String>,
}

impl BrainSnapshot {
    pub fn new(components: Vec<ComponentStatus>) -> Self {
        Self {
            taken_at: Utc::now(),
            components,
            halted: false,
            halt_reason: None,
        }
    }

    pub fn halt(mut self, reason: impl Into<String>) -> Self {
        self.halted = true;
        self.halt_reason = Some(reason.into());
        self
    }

    pub fn total_errors(&self) -> u32 {
        self.components.iter().map(|c| c.error_count).sum()
    }

    pub fn metric(&self, component: &str, key: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.name == component)
            .and_then(|c| c.metrics.get(key).copied())
    }
}
