//! Fallback line logger.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::sink::{LogSink, Record, SinkError};

/// Appends `"{timestamp} [{severity}] {line}"` to a file or writer.
///
/// Used when no structured subscriber is installed.
pub struct SimpleLogger {
    writer: Mutex<Box<dyn Write + Send>>,
    path: Option<PathBuf>,
}

impl SimpleLogger {
    /// Open `path` for appending, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(Box::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            path: None,
        }
    }

    /// File backing this logger, if it was opened from a path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn write_line(&self, line: &str, severity: u8) -> io::Result<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{} [{}] {}", timestamp, severity, line)?;
        writer.flush()
    }
}

impl std::fmt::Debug for SimpleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleLogger").field("path", &self.path).finish()
    }
}

impl LogSink for SimpleLogger {
    fn name(&self) -> &str {
        "simple"
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError> {
        self.write_line(record.line, record.severity())?;
        Ok(())
    }
}
