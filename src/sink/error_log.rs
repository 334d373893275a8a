//! Last-resort sink: the process error stream.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::sink::{LogSink, Record, SinkError};

/// Writes one line per entry to stderr (or an injected writer).
///
/// Always available, and never fails from the caller's point of view: write
/// errors on the error stream itself are dropped. The façade also uses it to
/// report failures of the other sinks.
pub struct ErrorLog {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ErrorLog {
    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Best-effort single-line write.
    pub fn report(&self, message: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{}", message);
        let _ = writer.flush();
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for ErrorLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ErrorLog")
    }
}

impl LogSink for ErrorLog {
    fn name(&self) -> &str {
        "error_log"
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError> {
        self.report(record.line);
        Ok(())
    }
}
