//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Install a `fmt` subscriber filtered by `config.filter`.
///
/// An invalid filter falls back to the default one. Calling this when a
/// global subscriber is already set (a second call, or a host application
/// that installed its own) leaves the existing one in place.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?}: {err}", config.filter);
        EnvFilter::new(LoggingConfig::default().filter)
    });

    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
