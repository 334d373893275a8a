//! Mutable façade settings and the running indent depth.

use std::collections::BTreeMap;

use crate::config::LoglineConfig;
use crate::facade::{Directive, Level};

/// String repeated once per indent level.
pub const DEFAULT_INDENT: &str = "  ";

/// Glyph used for levels missing from the indicator map.
pub const DEFAULT_INDICATOR: char = '.';

/// Environment variables that switch `trace()` on.
pub const DEFAULT_TRACE_ENV: &[&str] = &["LOGLINE_TRACE_LEVEL", "LOGLINE_DEBUG"];

/// Everything a log call reads or changes, kept behind the façade's mutex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerState {
    pub(crate) echo: bool,
    pub(crate) prefix: Option<String>,
    pub(crate) caller_depth: usize,
    pub(crate) indent_level: usize,
    pub(crate) indent_unit: String,
    pub(crate) default_indicator: char,
    pub(crate) indicators: BTreeMap<String, char>,
    pub(crate) trace_env: Vec<String>,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            echo: false,
            prefix: None,
            caller_depth: 0,
            indent_level: 0,
            indent_unit: DEFAULT_INDENT.to_string(),
            default_indicator: DEFAULT_INDICATOR,
            indicators: default_indicators(),
            trace_env: DEFAULT_TRACE_ENV.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `info *`, `notice ?`, `warning -`, `error !`.
pub fn default_indicators() -> BTreeMap<String, char> {
    [("info", '*'), ("notice", '?'), ("warning", '-'), ("error", '!')]
        .into_iter()
        .map(|(level, glyph)| (level.to_string(), glyph))
        .collect()
}

impl LoggerState {
    /// Build from an already validated config.
    ///
    /// Glyph strings contribute their first character; an empty glyph
    /// falls back to the default indicator.
    pub fn from_config(config: &LoglineConfig) -> Self {
        let default_indicator = config
            .default_indicator
            .chars()
            .next()
            .unwrap_or(DEFAULT_INDICATOR);

        let indicators = config
            .indicators
            .iter()
            .map(|(level, glyph)| {
                (level.clone(), glyph.chars().next().unwrap_or(default_indicator))
            })
            .collect();

        Self {
            echo: config.echo,
            prefix: config.prefix.clone(),
            caller_depth: config.caller_depth,
            indent_level: 0,
            indent_unit: config.indent.clone(),
            default_indicator,
            indicators,
            trace_env: config.trace_env.clone(),
        }
    }

    pub fn indicator_for(&self, level: &Level) -> char {
        self.indicators
            .get(level.as_str())
            .copied()
            .unwrap_or(self.default_indicator)
    }

    /// `indent × depth + prefix + glyph + " " + message`.
    pub fn format_line(&self, directive: Directive, glyph: char, message: &str) -> String {
        let depth = directive.display_depth(self.indent_level);
        let prefix = self.prefix.as_deref().unwrap_or("");

        let mut line = String::with_capacity(
            self.indent_unit.len() * depth + prefix.len() + message.len() + 2,
        );
        for _ in 0..depth {
            line.push_str(&self.indent_unit);
        }
        line.push_str(prefix);
        line.push(glyph);
        line.push(' ');
        line.push_str(message);
        line
    }

    pub fn decrement_indent(&mut self, amount: usize) {
        self.indent_level = self.indent_level.saturating_sub(amount);
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_env
            .iter()
            .any(|name| std::env::var_os(name).is_some())
    }
}
