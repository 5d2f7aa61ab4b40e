//! SeekingDrive (C3, §4.3): intrinsic-motivation level that mints the
//! market's currency every tick. The mint curve is deliberately nonlinear —
//! curiosity compounds, it doesn't just add.

use cortex_core::models::clamp;

const LEVEL_MIN: f64 = 0.1;
const LEVEL_MAX: f64 = 1.0;
const TARGET_FLOOR: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct SeekingDriveConfig {
    pub base_mint_rate: f64,
    pub error_sensitivity: f64,
    pub novelty_sensitivity: f64,
    pub decay_rate: f64,
}

impl Default for SeekingDriveConfig {
    fn default() -> Self {
        Self {
            base_mint_rate: 10.0,
            error_sensitivity: 0.3,
            novelty_sensitivity: 0.2,
            decay_rate: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeekingDrive {
    level: f64,
    target: f64,
    config: SeekingDriveConfig,
}

impl SeekingDrive {
    pub fn new(config: SeekingDriveConfig) -> Self {
        Self {
            level: TARGET_FLOOR,
            target: TARGET_FLOOR,
            config,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Shift the internal set-point by recent experience: positive
    /// prediction error and novelty both raise curiosity (§4.3).
    pub fn update_from_experience(&mut self, prediction_error: f64, novelty: f64) {
        let shift = self.config.error_sensitivity * prediction_error
            + self.config.novelty_sensitivity * novelty;
        self.target = clamp(self.target + shift, LEVEL_MIN, LEVEL_MAX).max(TARGET_FLOOR);
    }

    /// Decay `target` toward the floor, move `level` toward `target`
    /// proportional to `dt`, and return the currency minted this tick.
    ///
    /// `base_mint_rate * level^2 * 5 * dt` — at `level = 0.1` this is about
    /// 2% of `base_mint_rate * dt`; at `level = 1.0` it is 500%. The square
    /// is load-bearing (§4.3): curiosity pays off superlinearly.
    pub fn mint_currency(&mut self, dt: f64) -> f64 {
        self.target = (self.target + (TARGET_FLOOR - self.target) * self.config.decay_rate * dt)
            .max(TARGET_FLOOR);
        self.level = clamp(
            self.level + (self.target - self.level) * dt,
            LEVEL_MIN,
            LEVEL_MAX,
        );
        self.config.base_mint_rate * self.level * self.level * 5.0 * dt
    }

    /// `utility/cost >= 2.0 - 1.5*level` — high curiosity lowers the ROI bar (§4.3).
    pub fn evaluate_proposal(&self, cost: f64, utility: f64) -> bool {
        if cost <= 0.0 {
            return false;
        }
        utility / cost >= 2.0 - 1.5 * self.level
    }
}

impl Default for SeekingDrive {
    fn default() -> Self {
        Self::new(SeekingDriveConfig::default())
    }
}
