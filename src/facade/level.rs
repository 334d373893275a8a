//! Level names and the pipe-separated level lists accepted by `log`.

use std::fmt;

/// A named severity or channel.
///
/// Unknown names are kept verbatim in [`Level::Other`] so that custom
/// channels still flow through to the sinks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Trace,
    Debug,
    Api,
    Info,
    Notice,
    Warning,
    Error,
    Other(String),
}

impl Level {
    /// Parse a single level name. Never fails; unknown names become `Other`.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "api" => Level::Api,
            "info" => Level::Info,
            "notice" => Level::Notice,
            "warning" => Level::Warning,
            "error" => Level::Error,
            other => Level::Other(other.to_string()),
        }
    }

    /// Split a `"info|error"` style list into levels.
    ///
    /// Blank segments are ignored. A list with no usable segment yields
    /// `[Level::Info]`.
    pub fn parse_list(list: &str) -> Vec<Level> {
        let levels: Vec<Level> = list
            .split('|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Level::parse)
            .collect();

        if levels.is_empty() {
            vec![Level::Info]
        } else {
            levels
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Api => "api",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Other(name) => name,
        }
    }

    /// Upper-cased first character, used in the echo line.
    pub fn initial(&self) -> char {
        self.as_str()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Syslog-style numeric severity handed to the simple logger.
    pub fn severity(&self) -> u8 {
        match self {
            Level::Error => 3,
            Level::Warning => 4,
            Level::Notice => 5,
            Level::Info | Level::Other(_) => 6,
            Level::Debug | Level::Trace | Level::Api => 7,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
