//! Configuration for Relay applications.
//!
//! Namespace options and logging settings are loaded from TOML files,
//! `RELAY_*` environment variables and programmatic overrides.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{LogFormat, LogLevel, LogOutput, LoggingConfig, RelayConfig, SpanEventConfig};
