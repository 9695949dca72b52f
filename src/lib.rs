// cargo watch -x 'fmt' -x 'run -- 216.240.32.100 8.8.8.8'

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod routing;

use std::error::Error;

pub use error::RouterError;
use models::Resolution;
use routing::{RequiredProviders, RoutingService};

/// Load, validate and initialize a router from a config file.
///
/// Every provider in the file is registered with a [`RequiredProviders`]
/// registry, which is returned alongside the service.
pub fn init_router(
    config_file: Option<&str>,
) -> Result<(RoutingService, RequiredProviders), Box<dyn Error>> {
    let config = config::load_config(config_file)?;
    let mut registry = RequiredProviders::new();
    let service = RoutingService::initialize(config, &mut registry)?;
    Ok((service, registry))
}

/// Resolve every address, keeping input order.
pub fn resolve_all<S: AsRef<str>>(
    service: &RoutingService,
    addresses: &[S],
) -> Vec<(String, Resolution)> {
    addresses
        .iter()
        .map(|address| {
            let address = address.as_ref();
            (address.to_string(), service.resolve(address))
        })
        .collect()
}
