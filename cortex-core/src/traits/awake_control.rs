//! `AwakeControl`: the Heartbeat's view of the AwakeEngine for
//! metacognitive feedback (§4.5 step 4) and shutdown. Kept in `cortex-core`
//! so `cortex-heartbeat` never needs to depend on `cortex-awake` directly —
//! the dependency would otherwise point the wrong way, since `cortex-awake`
//! bids into the market the Heartbeat drives.

pub trait AwakeControl: Send + Sync {
    fn is_idle(&self) -> bool;
    fn queue_len(&self) -> usize;
    fn low_consistency_count(&self) -> u32;
    fn error_rate(&self) -> f64;

    /// Enqueue a request to focus on weak engrams on the next IDLE scan.
    fn request_focused_burst(&self);

    /// Multiply `current_hz` by `factor`, clamped to `[min_hz, max_hz]`.
    fn scale_hz(&self, factor: f64);

    /// Transition to SLEEPING and stop accepting new work.
    fn stop(&self);

    /// Feed the market's latest energy level into the mode machine
    /// (§4.6's energy-driven DREAMING/IDLE transitions).
    fn observe_energy(&self, energy_level: f64);
}
