//! Tracing subscriber setup.

use coursedesk_core::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "coursedesk=debug,tower_http=debug";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Compact output is meant for a terminal; JSON output carries every structured field for
/// log shippers.
pub fn init_telemetry(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (compact, json) = match format {
        LogFormat::Compact => (
            Some(
                tracing_subscriber::fmt::layer().event_format(
                    Format::default()
                        .compact()
                        .with_target(false)
                        .without_time(),
                ),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .try_init()?;

    tracing::info!(log_format = ?format, "Tracing initialized");
    Ok(())
}
