//! Router configuration.
//!
//! - [`RouterConfig`] - provider table, ordered address blocks, default and TTL
//! - [`load_config`] - read a [`RouterConfig`] from a JSON file

mod file;
mod router_config;

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "router_config.json";

/// Environment variable the binary reads the config path from.
pub const CONFIG_ENV_VAR: &str = "ROUTER_CONFIG";

pub use file::load_config;
pub use router_config::{Provider, RouterConfig};
