//! The log façade.
//!
//! # Data Flow
//! ```text
//! log(category?, message, "info|error")
//!     → caller.rs      infer category when none was given
//!     → directive.rs   strip ">>" / "<<", remember the indent change
//!     → translator     optional parameter substitution
//!     → under the state lock:
//!         per level: glyph lookup, format "{indent}{prefix}{glyph} {message}"
//!         apply indent change
//!     → per level, lock released:
//!         echo to stdout (CLI only, when enabled)
//!         first available sink, failures → ErrorLog
//!     → return last line
//! ```
//!
//! Nothing in here returns an error to the caller: a log call always yields
//! a line, whatever happens to the sinks.

mod caller;
mod directive;
mod entry;
pub mod global;
mod level;
mod state;

pub use caller::{
    format_frame, infer_category, parse_backtrace, BacktraceProbe, CallerProbe, Frame,
    NoCallerProbe,
};
pub use directive::Directive;
pub use entry::Entry;
pub use level::Level;
pub use state::{
    default_indicators, LoggerState, DEFAULT_INDENT, DEFAULT_INDICATOR, DEFAULT_TRACE_ENV,
};

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::config::{validate_config, ConfigError, LoglineConfig};
use crate::error::Error;
use crate::sink::{ErrorLog, LogSink, Record, SimpleLogger, TracingSink};
use crate::translate::{ParamTranslator, Translator};

/// Frames under this module path belong to the façade and are skipped when
/// inferring a category.
const OWN_MODULE: &str = module_path!();

/// Width of the category column in echoed lines.
pub const ECHO_CATEGORY_WIDTH: usize = 35;

/// Answers "is this a command-line session?" for the echo gate.
pub type CliProbe = Arc<dyn Fn() -> bool + Send + Sync>;

/// Formats log statements and hands them to the first available sink.
///
/// ```
/// use std::sync::Arc;
/// use logline::facade::{LogFacade, NoCallerProbe};
/// use logline::sink::SimpleLogger;
///
/// let facade = LogFacade::builder()
///     .sink(Arc::new(SimpleLogger::from_writer(std::io::sink())))
///     .caller_probe(Arc::new(NoCallerProbe))
///     .build();
///
/// assert_eq!(facade.info(Some("Setup"), ">> starting"), "* starting");
/// assert_eq!(facade.info(Some("Setup"), "loading"), "  * loading");
/// assert_eq!(facade.info(Some("Setup"), "<< ready"), "* ready");
/// assert_eq!(facade.current_indent(), 0);
/// ```
pub struct LogFacade {
    state: Mutex<LoggerState>,
    sinks: Vec<Arc<dyn LogSink>>,
    error_log: Arc<ErrorLog>,
    translator: Option<Arc<dyn Translator>>,
    caller_probe: Arc<dyn CallerProbe>,
    echo_writer: Mutex<Box<dyn Write + Send>>,
    is_cli: CliProbe,
}

impl LogFacade {
    pub fn builder() -> LogFacadeBuilder {
        LogFacadeBuilder::default()
    }

    /// Standard chain from config: tracing, then the simple log file when
    /// one is configured, then stderr.
    pub fn from_config(config: &LoglineConfig) -> Result<Self, Error> {
        Ok(Self::builder_from_config(config)?.build())
    }

    /// Same chain as [`from_config`](Self::from_config), left open so the
    /// caller can still replace the echo writer or CLI detection.
    pub fn builder_from_config(config: &LoglineConfig) -> Result<LogFacadeBuilder, Error> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let mut builder = Self::builder()
            .state(LoggerState::from_config(config))
            .translator(Arc::new(ParamTranslator))
            .sink(Arc::new(TracingSink::new()));

        if let Some(path) = &config.simple_log.path {
            let logger = SimpleLogger::open(path).map_err(|source| Error::SimpleLog {
                path: path.clone(),
                source,
            })?;
            builder = builder.sink(Arc::new(logger));
        }

        Ok(builder)
    }

    /// Log `message` at each level of the pipe-separated `level` list.
    pub fn log(&self, category: Option<&str>, message: &str, level: &str) -> String {
        self.log_entry(
            Entry::new(message)
                .with_optional_category(category)
                .with_level(level),
        )
    }

    /// Log a fully specified entry and return the last formatted line.
    pub fn log_entry(&self, entry: Entry<'_>) -> String {
        let category = match entry.category() {
            Some(category) => Some(category.to_string()),
            None => {
                let depth = self.state().caller_depth;
                infer_category(self.caller_probe.as_ref(), depth, OWN_MODULE)
            }
        };
        let category = category.as_deref();

        let (directive, body) = Directive::split(entry.message());
        let message = match &self.translator {
            Some(translator) => translator.translate(
                category,
                body,
                entry.params(),
                entry.source(),
                entry.locale(),
            ),
            None => body.to_string(),
        };

        let levels = Level::parse_list(entry.level());

        // Lines are formatted and the indent moved in one critical section,
        // so concurrent entries keep their nesting. Sinks run after the lock
        // is released and may log through this façade again.
        let (lines, echo_prefix) = {
            let mut state = self.state();
            let lines: Vec<String> = levels
                .iter()
                .map(|level| state.format_line(directive, state.indicator_for(level), &message))
                .collect();
            state.indent_level = directive.apply(state.indent_level);
            let echo_prefix = (state.echo && (self.is_cli)()).then(|| state.prefix.clone());
            (lines, echo_prefix)
        };

        for (level, line) in levels.iter().zip(&lines) {
            if let Some(prefix) = &echo_prefix {
                self.echo(level, category, prefix.as_deref(), &message);
            }
            self.dispatch(&Record {
                line,
                level,
                category,
            });
        }

        lines.into_iter().last().unwrap_or_default()
    }

    pub fn info(&self, category: Option<&str>, message: &str) -> String {
        self.log(category, message, "info")
    }

    pub fn error(&self, category: Option<&str>, message: &str) -> String {
        self.log(category, message, "error")
    }

    pub fn warning(&self, category: Option<&str>, message: &str) -> String {
        self.log(category, message, "warning")
    }

    pub fn debug(&self, category: Option<&str>, message: &str) -> String {
        self.log(category, message, "debug")
    }

    /// Logs only while one of the trace environment flags is set.
    pub fn trace(&self, category: Option<&str>, message: &str) -> Option<String> {
        if self.state().trace_enabled() {
            Some(self.log(category, message, "trace"))
        } else {
            None
        }
    }

    /// Log an API call and a dump of its response at level `api`.
    pub fn api<T: Serialize + ?Sized>(&self, call: &str, response: &T) -> String {
        let dump = serde_json::to_string_pretty(response)
            .unwrap_or_else(|err| format!("<unserializable response: {}>", err));
        self.log(Some(call), &format!("\n{}\n", dump), "api")
    }

    /// Message-first alias of [`log`](Self::log); a missing level means `info`.
    pub fn write(&self, message: &str, level: Option<&str>, category: Option<&str>) -> String {
        self.log(category, message, level.unwrap_or("info"))
    }

    pub fn decrement_indent(&self, amount: usize) {
        self.state().decrement_indent(amount);
    }

    pub fn echo_enabled(&self) -> bool {
        self.state().echo
    }

    pub fn set_echo_enabled(&self, echo: bool) {
        self.state().echo = echo;
    }

    pub fn prefix(&self) -> Option<String> {
        self.state().prefix.clone()
    }

    pub fn set_prefix(&self, prefix: Option<String>) {
        self.state().prefix = prefix;
    }

    pub fn caller_depth(&self) -> usize {
        self.state().caller_depth
    }

    pub fn set_caller_depth(&self, depth: usize) {
        self.state().caller_depth = depth;
    }

    pub fn current_indent(&self) -> usize {
        self.state().indent_level
    }

    pub fn set_current_indent(&self, level: usize) {
        self.state().indent_level = level;
    }

    pub fn default_indicator(&self) -> char {
        self.state().default_indicator
    }

    pub fn set_default_indicator(&self, glyph: char) {
        self.state().default_indicator = glyph;
    }

    pub fn indicators(&self) -> BTreeMap<String, char> {
        self.state().indicators.clone()
    }

    pub fn set_indicators(&self, indicators: BTreeMap<String, char>) {
        self.state().indicators = indicators;
    }

    pub fn indent_unit(&self) -> String {
        self.state().indent_unit.clone()
    }

    pub fn set_indent_unit(&self, unit: impl Into<String>) {
        self.state().indent_unit = unit.into();
    }

    pub fn trace_flags(&self) -> Vec<String> {
        self.state().trace_env.clone()
    }

    pub fn set_trace_flags(&self, names: Vec<String>) {
        self.state().trace_env = names;
    }

    /// Copy of the current settings and indent depth.
    pub fn snapshot(&self) -> LoggerState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn echo(&self, level: &Level, category: Option<&str>, prefix: Option<&str>, message: &str) {
        let line = format_echo(
            &chrono::Local::now().format("%Y.%m.%d %I.%M.%S").to_string(),
            level,
            category,
            prefix,
            message,
        );
        let mut writer = self.echo_writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }

    fn dispatch(&self, record: &Record<'_>) {
        let Some(sink) = self.sinks.iter().find(|sink| sink.is_available()) else {
            self.error_log.report(record.line);
            return;
        };

        if let Err(err) = sink.write(record) {
            tracing::debug!(sink = sink.name(), error = %err, "log sink failed");
            self.error_log.report(&format!(
                "LogFacade::log sink '{}' failed: {} | entry: {}",
                sink.name(),
                err,
                record.line
            ));
        }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<&str> = self.sinks.iter().map(|sink| sink.name()).collect();
        f.debug_struct("LogFacade")
            .field("state", &*self.state())
            .field("sinks", &sinks)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

/// `"{timestamp}[{L}] [{category:>35.35}]{prefix}{message}"`.
pub fn format_echo(
    timestamp: &str,
    level: &Level,
    category: Option<&str>,
    prefix: Option<&str>,
    message: &str,
) -> String {
    format!(
        "{}[{}] [{:>width$.width$}]{}{}",
        timestamp,
        level.initial(),
        category.unwrap_or(""),
        prefix.unwrap_or(""),
        message,
        width = ECHO_CATEGORY_WIDTH,
    )
}

/// Builder for [`LogFacade`].
///
/// With no explicit sinks the façade uses [`TracingSink`]; the
/// [`ErrorLog`] always sits behind the configured sinks.
#[derive(Default)]
pub struct LogFacadeBuilder {
    state: LoggerState,
    sinks: Vec<Arc<dyn LogSink>>,
    error_log: Option<Arc<ErrorLog>>,
    translator: Option<Arc<dyn Translator>>,
    caller_probe: Option<Arc<dyn CallerProbe>>,
    echo_writer: Option<Box<dyn Write + Send>>,
    is_cli: Option<CliProbe>,
}

impl std::fmt::Debug for LogFacadeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<&str> = self.sinks.iter().map(|sink| sink.name()).collect();
        f.debug_struct("LogFacadeBuilder")
            .field("state", &self.state)
            .field("sinks", &sinks)
            .field("translator", &self.translator.is_some())
            .finish_non_exhaustive()
    }
}

impl LogFacadeBuilder {
    pub fn state(mut self, state: LoggerState) -> Self {
        self.state = state;
        self
    }

    /// Append a sink; earlier sinks take priority.
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn error_log(mut self, error_log: Arc<ErrorLog>) -> Self {
        self.error_log = Some(error_log);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn caller_probe(mut self, probe: Arc<dyn CallerProbe>) -> Self {
        self.caller_probe = Some(probe);
        self
    }

    /// Destination for echoed lines (stdout by default).
    pub fn echo_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.echo_writer = Some(Box::new(writer));
        self
    }

    /// Override CLI detection (default: stdout is a terminal).
    pub fn cli_probe(mut self, probe: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.is_cli = Some(Arc::new(probe));
        self
    }

    pub fn build(self) -> LogFacade {
        let sinks = if self.sinks.is_empty() {
            vec![Arc::new(TracingSink::new()) as Arc<dyn LogSink>]
        } else {
            self.sinks
        };

        LogFacade {
            state: Mutex::new(self.state),
            sinks,
            error_log: self.error_log.unwrap_or_else(|| Arc::new(ErrorLog::stderr())),
            translator: self.translator,
            caller_probe: self
                .caller_probe
                .unwrap_or_else(|| Arc::new(BacktraceProbe) as Arc<dyn CallerProbe>),
            echo_writer: Mutex::new(
                self.echo_writer
                    .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>),
            ),
            is_cli: self
                .is_cli
                .unwrap_or_else(|| Arc::new(|| io::stdout().is_terminal()) as CliProbe),
        }
    }
}
