use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub demurrage_rate_per_min: f64,
    pub wealth_cap_ratio: f64,
    pub recharge_rate: f64,
    pub drain_rate_base: f64,
    pub interrupt_multiplier: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            demurrage_rate_per_min: 0.08,
            wealth_cap_ratio: 0.25,
            recharge_rate: 5.0,
            drain_rate_base: 2.0,
            interrupt_multiplier: 50.0,
        }
    }
}
