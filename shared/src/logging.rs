//! Shared logging utilities for consistent tracing across binaries

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing with the default `info` level, honoring `RUST_LOG`
/// when set.
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Initialize tracing with an explicit level override.
///
/// Precedence: `RUST_LOG` env filter, then the explicit level, then
/// `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing_with_level(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
