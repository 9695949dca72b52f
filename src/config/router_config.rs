//! Static routing configuration and its validation.

use crate::error::RouterError;
use crate::models::{Netmask, RouteEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;

/// Connection descriptor for a provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Canonical name answered for this provider.
    pub cname: String,
}

/// Raw routing configuration, as written by the operator.
///
/// Never modified after loading; [`RouterConfig::validate`] produces the
/// parsed routing table separately.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Provider alias -> connection descriptor.
    pub providers: BTreeMap<String, Provider>,
    /// `[raw_spec, provider_alias]` pairs, evaluated top to bottom.
    pub address_blocks: Vec<(String, String)>,
    /// Alias used when no block matches.
    pub default_provider: String,
    /// Response TTL in seconds.
    #[serde(rename = "responseTTL")]
    pub response_ttl: u32,
}

impl RouterConfig {
    /// Parse a config from JSON text, reporting the failing path on error.
    pub fn from_json(json: &str) -> Result<RouterConfig, Box<dyn Error>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let config: RouterConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("Error parsing router config: path={} error={}", e.path(), e))?;
        Ok(config)
    }

    /// Check every alias and the TTL, and parse every address block in order.
    pub fn validate(&self) -> Result<Vec<RouteEntry>, RouterError> {
        if self.response_ttl == 0 {
            return Err(RouterError::InvalidConfig(
                "responseTTL must be a positive number of seconds".into(),
            ));
        }
        self.provider(&self.default_provider)?;

        self.address_blocks
            .iter()
            .map(|(raw_spec, alias)| {
                self.provider(alias)?;
                let block = Netmask::parse(raw_spec)?;
                log::debug!("parsed block {raw_spec:?} -> {block} => {alias}");
                Ok(RouteEntry::new(block, alias.as_str()))
            })
            .collect()
    }

    /// Look up a provider by alias.
    pub fn provider(&self, alias: &str) -> Result<&Provider, RouterError> {
        self.providers
            .get(alias)
            .ok_or_else(|| RouterError::UnknownProvider(alias.to_string()))
    }
}
