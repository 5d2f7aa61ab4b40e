use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconsolidationConfig {
    pub window_seconds: i64,
}

impl Default for ReconsolidationConfig {
    fn default() -> Self {
        Self { window_seconds: 30 }
    }
}
