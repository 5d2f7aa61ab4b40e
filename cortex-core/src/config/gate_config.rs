use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub num_translators: usize,
    pub min_agreement: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            num_translators: 3,
            min_agreement: 0.6,
        }
    }
}
