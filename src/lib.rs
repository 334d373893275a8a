//! Indenting log façade.
//!
//! Formats log lines with category, level glyph and indentation, and hands
//! each one to the first available backend: a `tracing` subscriber, a plain
//! log file, or stderr.

pub mod config;
pub mod error;
pub mod facade;
pub mod observability;
pub mod sink;
pub mod translate;

pub use config::LoglineConfig;
pub use error::{Error, Result};
pub use facade::{Entry, Level, LogFacade, LogFacadeBuilder};
pub use sink::{ErrorLog, LogSink, SimpleLogger, TracingSink};
