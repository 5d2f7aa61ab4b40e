//! One place to turn on structured logging, the way every binary sitting
//! on top of this workspace is expected to do before constructing a
//! [`crate::handle::CoreHandle`].

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber reading `RUST_LOG`, defaulting to
/// `info` when unset. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
