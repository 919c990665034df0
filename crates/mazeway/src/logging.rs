//! Tracing setup for applications built on Mazeway.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a config value says otherwise.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins if set; otherwise `filter` (typically
/// [`MazewayConfig::log_level`](crate::MazewayConfig::log_level)) is used,
/// falling back to [`DEFAULT_LOG_FILTER`] if it does not parse. Calling
/// this more than once is harmless: later calls leave the first
/// subscriber in place.
///
/// Output goes to stderr so it does not mix with a terminal UI on stdout.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
