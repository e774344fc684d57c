//! Telemetry helpers for applications embedding `chart-scene`.
//!
//! The scene logs lifecycle and drain activity through `tracing`; installing
//! a subscriber stays the host's decision. Hosts can call one of the helpers
//! below or wire their own subscriber and filters.

/// Initializes an env-filtered `tracing` subscriber (defaulting to `info`)
/// when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

/// Like [`init_default_tracing`], falling back to `directive` (for example
/// `chart_scene=debug`) when `RUST_LOG` is unset or invalid.
#[must_use]
pub fn init_tracing_with_default_filter(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
