pub mod auto_tuning;
pub mod metrics;
