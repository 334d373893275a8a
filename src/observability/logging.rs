//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber the structured sink writes to
//! - Pick the output format from config
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured filter
//! - Output goes to stderr so echoed lines keep stdout to themselves

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, SubscriberConfig};
use crate::error::Error;

/// Filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(config: &SubscriberConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber.
///
/// Once this succeeds, [`TracingSink`](crate::sink::TracingSink) reports
/// itself available and takes over from the fallback sinks.
pub fn init_subscriber(config: &SubscriberConfig) -> Result<(), Error> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(io::stderr).pretty())
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(io::stderr).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(io::stderr).json().with_target(true))
            .try_init(),
    };

    result.map_err(Error::Subscriber)
}
