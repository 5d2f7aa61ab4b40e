use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub rate_daily: f64,
    pub prune_threshold: f64,
    pub protect_accuracy_threshold: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rate_daily: 0.02,
            prune_threshold: 0.4,
            protect_accuracy_threshold: 0.9,
        }
    }
}
