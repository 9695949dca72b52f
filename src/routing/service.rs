//! Routing service: one-time initialization and per-query resolution.

use super::router::{Decision, OrderedRouter};
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::models::{Reason, Resolution};
use std::net::Ipv4Addr;

/// Host-side registration of the providers a router depends on.
///
/// Called once per provider alias during [`RoutingService::initialize`]; an
/// error aborts startup.
pub trait ProviderRegistry {
    fn require_provider(&mut self, alias: &str) -> Result<(), RouterError>;
}

/// Registry that records every required alias.
#[derive(Debug, Default, Clone)]
pub struct RequiredProviders {
    aliases: Vec<String>,
}

impl RequiredProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

impl ProviderRegistry for RequiredProviders {
    fn require_provider(&mut self, alias: &str) -> Result<(), RouterError> {
        log::debug!("require provider {alias}");
        self.aliases.push(alias.to_string());
        Ok(())
    }
}

/// Initialized router plus the provider table it answers from.
///
/// Immutable once built, so it can be shared between worker threads.
#[derive(Debug, Clone)]
pub struct RoutingService {
    config: RouterConfig,
    router: OrderedRouter,
    /// Answer for each router entry, same order.
    matched: Vec<Resolution>,
    fallback: Resolution,
}

impl RoutingService {
    /// Validate `config`, parse its blocks and register every provider.
    ///
    /// # Errors
    /// * [`RouterError::UnknownProvider`] - a block or the default names a missing alias
    /// * [`RouterError::InvalidBlockSpec`] / [`RouterError::InvalidAddress`] - a block doesn't parse
    /// * [`RouterError::InvalidConfig`] - TTL is zero
    /// * whatever the registry returns
    pub fn initialize<R>(config: RouterConfig, registry: &mut R) -> Result<Self, RouterError>
    where
        R: ProviderRegistry + ?Sized,
    {
        let entries = config.validate()?;
        for alias in config.providers.keys() {
            registry.require_provider(alias)?;
        }

        let matched = entries
            .iter()
            .map(|entry| build_answer(&config, &entry.provider_alias, Reason::Matched))
            .collect::<Result<Vec<_>, _>>()?;
        let fallback = build_answer(&config, &config.default_provider, Reason::Default)?;

        let router = OrderedRouter::new(entries, config.default_provider.as_str());
        log::info!(
            "Router initialized: {} providers, {} address blocks, default={}, ttl={}s",
            config.providers.len(),
            router.entries().len(),
            router.default_alias(),
            config.response_ttl
        );
        Ok(RoutingService {
            config,
            router,
            matched,
            fallback,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn router(&self) -> &OrderedRouter {
        &self.router
    }

    /// Resolve a requester address, falling back to the default provider
    /// when the address is malformed.
    pub fn resolve(&self, address: &str) -> Resolution {
        match self.try_resolve(address) {
            Ok(resolution) => resolution,
            Err(e) => {
                log::warn!("{e}, answering with default provider");
                self.fallback.clone()
            }
        }
    }

    /// Resolve a requester address, returning malformed input as an error.
    pub fn try_resolve(&self, address: &str) -> Result<Resolution, RouterError> {
        let decision = self.router.route_str(address)?;
        log::trace!("{address} -> {decision:?}");
        Ok(self.answer(decision))
    }

    pub fn resolve_ip(&self, addr: Ipv4Addr) -> Resolution {
        self.answer(self.router.route_ip(addr))
    }

    fn answer(&self, decision: Decision<'_>) -> Resolution {
        match decision.entry_index {
            Some(i) => self.matched[i].clone(),
            None => self.fallback.clone(),
        }
    }
}

/// Look up the provider once, while the config is still being checked.
fn build_answer(
    config: &RouterConfig,
    alias: &str,
    reason: Reason,
) -> Result<Resolution, RouterError> {
    let provider = config.provider(alias)?;
    Ok(Resolution {
        provider_alias: alias.to_string(),
        cname: provider.cname.clone(),
        ttl: config.response_ttl,
        reason,
    })
}
