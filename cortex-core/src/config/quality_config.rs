use serde::{Deserialize, Serialize};

use crate::quality::QualityWeights;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QualityConfig {
    pub weights: QualityWeights,
}
