//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Glyphs are exactly one character
//! - Strings that must not be empty are not
//! - The subscriber filter parses as an `EnvFilter` directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoglineConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::LoglineConfig;

/// A single invalid option.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("indicator for level '{level}' must be a single character, got {glyph:?}")]
    Indicator { level: String, glyph: String },

    #[error("default_indicator must be a single character, got {0:?}")]
    DefaultIndicator(String),

    #[error("indent must not be empty")]
    EmptyIndent,

    #[error("indicator level names must not be empty")]
    EmptyLevelName,

    #[error("trace_env entry {0} is empty")]
    EmptyTraceVariable(usize),

    #[error("simple_log.path must not be empty")]
    EmptySimpleLogPath,

    #[error("subscriber.filter {filter:?} is invalid: {reason}")]
    Filter { filter: String, reason: String },
}

fn is_single_char(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Check a deserialized config, collecting every problem found.
pub fn validate_config(config: &LoglineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_single_char(&config.default_indicator) {
        errors.push(ValidationError::DefaultIndicator(config.default_indicator.clone()));
    }

    for (level, glyph) in &config.indicators {
        if level.trim().is_empty() {
            errors.push(ValidationError::EmptyLevelName);
        }
        if !is_single_char(glyph) {
            errors.push(ValidationError::Indicator {
                level: level.clone(),
                glyph: glyph.clone(),
            });
        }
    }

    if config.indent.is_empty() {
        errors.push(ValidationError::EmptyIndent);
    }

    for (index, name) in config.trace_env.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyTraceVariable(index));
        }
    }

    if matches!(config.simple_log.path.as_deref(), Some(path) if path.trim().is_empty()) {
        errors.push(ValidationError::EmptySimpleLogPath);
    }

    if config.subscriber.enabled {
        if let Err(err) = EnvFilter::try_new(&config.subscriber.filter) {
            errors.push(ValidationError::Filter {
                filter: config.subscriber.filter.clone(),
                reason: err.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
