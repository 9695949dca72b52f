//! Loading router configuration from disk.

use super::{RouterConfig, DEFAULT_CONFIG_FILE};
use std::error::Error;
use std::path::Path;

/// Read the router config from a JSON file.
///
/// # Arguments
/// * `config_file` - Optional path to a specific config file. If None, uses
///   [`DEFAULT_CONFIG_FILE`].
///
/// # Returns
/// * `Ok(RouterConfig)` - The parsed, not yet validated, configuration
/// * `Err` - If the file doesn't exist, can't be read or isn't valid JSON
pub fn load_config(config_file: Option<&str>) -> Result<RouterConfig, Box<dyn Error>> {
    let config_file = config_file.unwrap_or(DEFAULT_CONFIG_FILE);
    if !Path::new(config_file).exists() {
        return Err(format!("Config file does not exist: {config_file}").into());
    }

    log::info!("Reading router config file: {config_file}");
    let json = std::fs::read_to_string(config_file)
        .map_err(|e| format!("Error reading config file {config_file}: {e}"))?;
    let config = RouterConfig::from_json(&json)?;

    log::info!(
        "Loaded {} providers and {} address blocks from {config_file}",
        config.providers.len(),
        config.address_blocks.len()
    );
    Ok(config)
}
