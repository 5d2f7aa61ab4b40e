use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AwakeConfig {
    pub enabled: bool,
    pub min_hz: f64,
    pub max_hz: f64,
    pub uncertainty_threshold: f64,
    pub max_refinements_per_run: u32,
}

impl Default for AwakeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_hz: 0.5,
            max_hz: 60.0,
            uncertainty_threshold: 0.6,
            max_refinements_per_run: 5,
        }
    }
}
