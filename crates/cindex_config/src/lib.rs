//! Parsing and validation of `cindex.toml` configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`IndexConfig`] holding the index verbosity, teardown policy, engine global
//! options, and the compilation-database settings.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
