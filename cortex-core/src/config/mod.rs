pub mod awake_config;
pub mod clustering_config;
pub mod decay_config;
pub mod embedding_config;
pub mod features_config;
pub mod gate_config;
pub mod market_config;
pub mod quality_config;
pub mod reasoning_config;
pub mod reconsolidation_config;
pub mod retrieval_config;
pub mod working_memory_config;

use serde::{Deserialize, Serialize};

pub use awake_config::AwakeConfig;
pub use clustering_config::{ClusteringConfig, ClusteringMetric};
pub use decay_config::DecayConfig;
pub use embedding_config::EmbeddingConfig;
pub use features_config::FeaturesConfig;
pub use gate_config::GateConfig;
pub use market_config::MarketConfig;
pub use quality_config::QualityConfig;
pub use reasoning_config::ReasoningConfig;
pub use reconsolidation_config::ReconsolidationConfig;
pub use retrieval_config::RetrievalConfig;
pub use working_memory_config::WorkingMemoryConfig;

/// Top-level configuration aggregating every subsystem's flat config group
/// (spec §6). Every option named in the spec has a field here; nothing is
/// hidden behind a free-form map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CortexConfig {
    pub embedding: EmbeddingConfig,
    pub clustering: ClusteringConfig,
    pub decay: DecayConfig,
    pub retrieval: RetrievalConfig,
    pub features: FeaturesConfig,
    pub awake: AwakeConfig,
    pub quality: QualityConfig,
    pub reasoning: ReasoningConfig,
    pub gate: GateConfig,
    pub reconsolidation: ReconsolidationConfig,
    pub working_memory: WorkingMemoryConfig,
    pub market: MarketConfig,
}

impl CortexConfig {
    /// Load config from a TOML string, falling back to defaults for missing
    /// fields thanks to `#[serde(default)]` on every group.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_all_defaults() {
        let cfg = CortexConfig::from_toml("").unwrap();
        assert_eq!(cfg.awake.min_hz, 0.5);
        assert_eq!(cfg.gate.min_agreement, 0.6);
    }

    #[test]
    fn partial_override_preserves_other_defaults() {
        let cfg = CortexConfig::from_toml("[awake]\nmax_hz = 30.0\n").unwrap();
        assert_eq!(cfg.awake.max_hz, 30.0);
        assert_eq!(cfg.awake.min_hz, 0.5);
    }
}
