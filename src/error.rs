//! Crate-level error type for setup paths.
//!
//! Logging itself never fails; only building a façade or installing a
//! subscriber can.

use thiserror::Error;
use tracing_subscriber::util::TryInitError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The fallback log file could not be opened.
    #[error("cannot open simple log {path}: {source}")]
    SimpleLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed, or installation failed.
    #[error("cannot install tracing subscriber")]
    Subscriber(#[source] TryInitError),
}

pub type Result<T> = std::result::Result<T, Error>;
