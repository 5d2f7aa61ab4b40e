use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub enabled: bool,
    pub consistency_threshold: f64,
    pub axiom_affinity_threshold: f64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            consistency_threshold: 0.8,
            axiom_affinity_threshold: 0.7,
        }
    }
}
