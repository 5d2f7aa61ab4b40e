//! Small read-only views returned by `Heartbeat::get_health`/`get_time_series`.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub halted: bool,
    pub halt_reason: Option<String>,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub history_len: usize,
}
