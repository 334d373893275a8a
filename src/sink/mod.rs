//! Delivery backends for formatted log lines.
//!
//! # Data Flow
//! ```text
//! LogFacade::log
//!     → Record (line, level, category, severity)
//!     → first sink whose is_available() is true
//!         TracingSink   structured, needs a global tracing subscriber
//!         SimpleLogger  plain file/writer, line + integer severity
//!         ErrorLog      stderr, always available
//!     → Err(SinkError) is reported once through the ErrorLog
//! ```
//!
//! Sinks are probed in order on every call, so installing a tracing
//! subscriber after the façade is built still takes effect.
//! The façade's state lock is released before any sink runs, so a sink may
//! itself log through the façade.

mod error_log;
mod simple;
mod structured;

pub use error_log::ErrorLog;
pub use simple::SimpleLogger;
pub use structured::TracingSink;

use thiserror::Error;

use crate::facade::Level;

/// A formatted entry on its way to a sink.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Fully formatted line (indent, prefix, glyph and message).
    pub line: &'a str,
    pub level: &'a Level,
    pub category: Option<&'a str>,
}

impl Record<'_> {
    pub fn severity(&self) -> u8 {
        self.level.severity()
    }
}

/// Errors a sink may report. The façade never propagates these.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying file or stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink was selected but could not accept the entry.
    #[error("sink unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the entry.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// A log backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one façade is shared across threads.
pub trait LogSink: Send + Sync {
    /// Short name used in failure diagnostics.
    fn name(&self) -> &str;

    /// Capability probe, checked on every call.
    fn is_available(&self) -> bool {
        true
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError>;
}
