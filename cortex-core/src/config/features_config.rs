use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub serendipity_enabled: bool,
    pub serendipity_min_quality: f64,
    pub hyperfocus_enabled: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            serendipity_enabled: false,
            serendipity_min_quality: 0.6,
            hyperfocus_enabled: false,
        }
    }
}
