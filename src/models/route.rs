//! Routing table entries and resolution results.

use super::Netmask;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed address block and the provider alias it routes to.
///
/// Position in the router's list is the match priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub block: Netmask,
    pub provider_alias: String,
}

impl RouteEntry {
    pub fn new(block: Netmask, provider_alias: impl Into<String>) -> Self {
        RouteEntry {
            block,
            provider_alias: provider_alias.into(),
        }
    }
}

/// Which rule produced a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    /// An address block matched.
    #[serde(rename = "mapped")]
    Matched,
    /// No block matched, fell through to the default provider.
    #[serde(rename = "default")]
    Default,
}

impl Reason {
    /// Reason code reported to the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Matched => "mapped",
            Reason::Default => "default",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the host needs to answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Selected provider alias.
    pub provider_alias: String,
    /// Connection target of the selected provider.
    pub cname: String,
    /// Response TTL in seconds.
    pub ttl: u32,
    pub reason: Reason,
}
