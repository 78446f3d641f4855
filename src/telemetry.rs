//! Opt-in tracing setup for hosts embedding `projection-chart`.
//!
//! Render cycles log at `debug` (cycle start, adapted series, abort reasons,
//! connector outcome) and readiness checks at `trace`. Pattern failures are
//! the only `warn` events. Hosts with their own subscriber need nothing here.

/// Filter used when `RUST_LOG` is unset: crate events at `debug`, everything else at `info`.
pub const DEFAULT_FILTER: &str = "info,projection_chart=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset or unparsable.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Like [`init_default_tracing`], with explicit filter directives such as
/// `"projection_chart::api::connector_resolver=trace"`.
///
/// Returns `false` for unparsable directives as well.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        };
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
