//! Log output for applications embedding `chart-plan`.
//!
//! What the crate emits through `tracing`:
//! - `trace`: every lifecycle stage boundary (`plot layer stage`) and gated
//!   responsive checkpoints
//! - `debug`: layer creation, resize, data changes, draws and afterRender
//!   recompiles
//! - `warn`: registry overwrites, rolled-back responsive rules and ignored
//!   axis settings
//!
//! Nothing is printed unless the host installs a subscriber, either through
//! `init_default_tracing` or its own (`RUST_LOG=chart_plan=trace`).

/// Installs a compact `fmt` subscriber filtered to `chart_plan=info` unless
/// `RUST_LOG` says otherwise.
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chart_plan=info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
