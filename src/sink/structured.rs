//! Structured sink backed by the `tracing` crate.

use crate::facade::Level;
use crate::sink::{LogSink, Record, SinkError};

/// Forwards entries as `tracing` events carrying `category` and `level_name`
/// fields.
///
/// Only available once a global subscriber has been installed (see
/// [`crate::observability::init_subscriber`]); until then the façade falls
/// through to the next sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn is_available(&self) -> bool {
        tracing::dispatcher::has_been_set()
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError> {
        let category = record.category.unwrap_or("");
        let level_name = record.level.as_str();
        let line = record.line;

        match record.level {
            Level::Error => tracing::error!(target: "logline", category, level_name, "{}", line),
            Level::Warning => tracing::warn!(target: "logline", category, level_name, "{}", line),
            Level::Info | Level::Notice | Level::Other(_) => {
                tracing::info!(target: "logline", category, level_name, "{}", line)
            }
            Level::Debug | Level::Api => {
                tracing::debug!(target: "logline", category, level_name, "{}", line)
            }
            Level::Trace => tracing::trace!(target: "logline", category, level_name, "{}", line),
        }
        Ok(())
    }
}
