//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! LogFacade → TracingSink → tracing event
//!     → logging.rs subscriber (EnvFilter + fmt layer)
//!     → stderr (pretty, compact or JSON)
//! ```

pub mod logging;

pub use logging::{env_filter, init_subscriber};
