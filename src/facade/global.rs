//! Optional process-wide façade.
//!
//! Hosts that prefer a static entry point install one façade at startup
//! and reach it from anywhere; everything else should pass a `LogFacade`
//! (or an `Arc` of one) explicitly.

use std::sync::OnceLock;

use crate::facade::LogFacade;

static GLOBAL: OnceLock<LogFacade> = OnceLock::new();

/// Install `facade` as the process-wide instance.
///
/// Fails, handing the façade back, if one is already installed.
pub fn install(facade: LogFacade) -> Result<(), LogFacade> {
    GLOBAL.set(facade)
}

/// The installed façade, if any.
pub fn get() -> Option<&'static LogFacade> {
    GLOBAL.get()
}

/// The installed façade, installing a default one on first use.
pub fn facade() -> &'static LogFacade {
    GLOBAL.get_or_init(LogFacade::default)
}
