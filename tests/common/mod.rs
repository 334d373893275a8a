//! Shared utilities for façade integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use logline::facade::{CallerProbe, Frame, LogFacade, NoCallerProbe};
use logline::sink::{ErrorLog, LogSink, Record, SinkError};

/// In-memory writer whose contents can be read back after it is moved
/// into a sink.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a sink received for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub line: String,
    pub level: String,
    pub category: Option<String>,
    pub severity: u8,
}

/// Sink that remembers every record.
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<Delivered>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<Delivered> {
        self.records.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn write(&self, record: &Record<'_>) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(Delivered {
            line: record.line.to_string(),
            level: record.level.to_string(),
            category: record.category.map(str::to_string),
            severity: record.severity(),
        });
        Ok(())
    }
}

/// Sink that rejects everything.
pub struct FailingSink;

impl LogSink for FailingSink {
    fn name(&self) -> &str {
        "structured"
    }

    fn write(&self, _record: &Record<'_>) -> Result<(), SinkError> {
        Err(SinkError::Rejected("backend exploded".into()))
    }
}

/// Caller probe returning a fixed stack.
pub struct StaticProbe(pub Vec<Frame>);

impl CallerProbe for StaticProbe {
    fn frames(&self) -> Option<Vec<Frame>> {
        Some(self.0.clone())
    }
}

/// Façade with a recording sink, a captured error log and no caller probe.
pub fn recording_facade() -> (LogFacade, Arc<RecordingSink>, SharedBuffer) {
    let sink = Arc::new(RecordingSink::default());
    let errors = SharedBuffer::default();
    let facade = LogFacade::builder()
        .sink(sink.clone())
        .error_log(Arc::new(ErrorLog::from_writer(errors.clone())))
        .caller_probe(Arc::new(NoCallerProbe))
        .cli_probe(|| false)
        .build();
    (facade, sink, errors)
}
