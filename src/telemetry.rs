//! Opt-in tracing setup for applications embedding `chart-realtime`.
//!
//! The crate only emits `tracing` events: timer start, stop and restart,
//! pause transitions and evictions at `debug`, per-frame scrolling and tick
//! generation at `trace`. Hosts either install their own subscriber or, with
//! the `telemetry` feature, call one of the helpers below.

/// Filter used by [`init_default_tracing`] when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_FILTER: &str = "chart_realtime=info";

/// Filter that surfaces every scroll step and tick pass.
pub const FRAME_TRACING_FILTER: &str = "chart_realtime=trace";

/// Installs a compact global subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(None)
}

/// Installs a compact global subscriber with explicit filter directives,
/// ignoring `RUST_LOG`.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    init_tracing(Some(directives))
}

#[cfg(feature = "telemetry")]
fn init_tracing(directives: Option<&str>) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "telemetry"))]
fn init_tracing(_directives: Option<&str>) -> bool {
    false
}
