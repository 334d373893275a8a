//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default, so an empty file is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for a log façade.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoglineConfig {
    /// Mirror entries to stdout when running in a terminal.
    pub echo: bool,

    /// Prepended to every formatted entry.
    pub prefix: Option<String>,

    /// Caller frames skipped when inferring a category.
    pub caller_depth: usize,

    /// String repeated once per indent level.
    pub indent: String,

    /// Glyph for levels missing from `indicators`.
    pub default_indicator: String,

    /// Level name to single-character glyph.
    pub indicators: BTreeMap<String, String>,

    /// Environment variables that enable `trace()`.
    pub trace_env: Vec<String>,

    /// Fallback file logger.
    pub simple_log: SimpleLogConfig,

    /// `tracing` subscriber used by the structured sink.
    pub subscriber: SubscriberConfig,
}

impl Default for LoglineConfig {
    fn default() -> Self {
        Self {
            echo: false,
            prefix: None,
            caller_depth: 0,
            indent: crate::facade::DEFAULT_INDENT.to_string(),
            default_indicator: crate::facade::DEFAULT_INDICATOR.to_string(),
            indicators: crate::facade::default_indicators()
                .into_iter()
                .map(|(level, glyph)| (level, glyph.to_string()))
                .collect(),
            trace_env: crate::facade::DEFAULT_TRACE_ENV
                .iter()
                .map(|name| name.to_string())
                .collect(),
            simple_log: SimpleLogConfig::default(),
            subscriber: SubscriberConfig::default(),
        }
    }
}

/// Fallback file logger settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SimpleLogConfig {
    /// Log file path; the sink is only installed when set.
    pub path: Option<String>,
}

/// Subscriber settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubscriberConfig {
    /// Install a global subscriber at startup.
    pub enabled: bool,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Subscriber output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}
