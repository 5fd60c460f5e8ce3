//! Subscriber setup for the binary.
//!
//! Stores log `entity_type` and the record id on every operation; client methods open a
//! span per call through `#[instrument]`. Output is compact and drops the module target.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, before the system starts.
///
/// Falls back to `info` when `RUST_LOG` is unset or invalid.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
