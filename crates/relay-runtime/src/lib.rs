//! Relay Runtime - configuration and logging for Relay applications.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`): defaults, `relay.toml`,
//!   `RELAY_*` environment variables and programmatic overrides
//! - Logging initialisation (`LoggingBuilder`, `logging::init_from_config`)
//!
//! ```ignore
//! use relay_runtime::{config::load_config, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     logging::init_from_config(&config.logging);
//!
//!     // build creators and reducers with `config.namespace`
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader, ConfigResult, LoggingConfig, RelayConfig};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
