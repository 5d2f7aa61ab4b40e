//! The five-state AwakeEngine mode machine (§4.6). Transitions are driven
//! by market allocations, energy level, and queue state — never directly
//! set by a caller except `stop()`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwakeMode {
    Idle,
    Thinking,
    Focused,
    Dreaming,
    Sleeping,
}

impl AwakeMode {
    /// `current_hz` target for this mode, given the queue length and the
    /// configured `min_hz`/`max_hz` band (§4.6 "Hz adjustment").
    pub fn base_hz(self, queue_len: usize, min_hz: f64, max_hz: f64) -> f64 {
        match self {
            AwakeMode::Idle => min_hz,
            AwakeMode::Thinking => 2.0 + (queue_len.min(10) as f64 / 10.0) * 13.0,
            AwakeMode::Focused => (15.0 + 5.0 * queue_len as f64).min(max_hz),
            AwakeMode::Dreaming => min_hz,
            AwakeMode::Sleeping => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AllocationSignal {
    pub resource_is_power_lease: bool,
    pub amount: f64,
}

/// `receive_allocation`'s contribution to the mode transition (§4.6).
/// Energy and `stop()` transitions are handled separately since they can
/// override whatever this returns.
pub fn mode_after_allocation(signal: AllocationSignal) -> AwakeMode {
    if signal.resource_is_power_lease && signal.amount > 0.0 {
        AwakeMode::Focused
    } else if signal.amount >= 10.0 {
        AwakeMode::Thinking
    } else {
        AwakeMode::Idle
    }
}

/// Energy-driven overrides, applied after any allocation-driven transition.
pub fn mode_after_energy(current: AwakeMode, energy_level: f64) -> AwakeMode {
    if energy_level < 20.0 {
        AwakeMode::Dreaming
    } else if energy_level > 80.0 && current == AwakeMode::Dreaming {
        AwakeMode::Idle
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_lease_allocation_forces_focused() {
        let mode = mode_after_allocation(AllocationSignal {
            resource_is_power_lease: true,
            amount: 60.0,
        });
        assert_eq!(mode, AwakeMode::Focused);
    }

    #[test]
    fn small_compute_allocation_stays_idle() {
        let mode = mode_after_allocation(AllocationSignal {
            resource_is_power_lease: false,
            amount: 5.0,
        });
        assert_eq!(mode, AwakeMode::Idle);
    }

    #[test]
    fn low_energy_overrides_to_dreaming() {
        assert_eq!(mode_after_energy(AwakeMode::Thinking, 10.0), AwakeMode::Dreaming);
    }

    #[test]
    fn recovered_energy_only_wakes_from_dreaming() {
        assert_eq!(mode_after_energy(AwakeMode::Dreaming, 90.0), AwakeMode::Idle);
        assert_eq!(mode_after_energy(AwakeMode::Focused, 90.0), AwakeMode::Focused);
    }
}
