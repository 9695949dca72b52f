//! First-match-wins routing over an ordered list of address blocks.

use crate::error::RouterError;
use crate::models::{octet_count, parse_address, Netmask, Reason, RouteEntry};
use itertools::Itertools;
use std::net::Ipv4Addr;

/// Outcome of routing one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
    pub provider_alias: &'a str,
    pub reason: Reason,
    /// Position of the matching entry, `None` for the default.
    pub entry_index: Option<usize>,
}

/// Ordered list of (block, provider) pairs plus a default provider.
///
/// Overlapping blocks are resolved by list position only: the earliest entry
/// that contains the address wins, regardless of block size. Entries are
/// never reordered.
#[derive(Debug, Clone)]
pub struct OrderedRouter {
    entries: Vec<RouteEntry>,
    default_alias: String,
}

impl OrderedRouter {
    pub fn new(entries: Vec<RouteEntry>, default_alias: impl Into<String>) -> Self {
        OrderedRouter {
            entries,
            default_alias: default_alias.into(),
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn default_alias(&self) -> &str {
        &self.default_alias
    }

    /// Route an address given as an integer.
    ///
    /// Only usable addresses match a block: the network and broadcast
    /// addresses of a block with bitmask <= 30 fall through to later entries
    /// or the default.
    pub fn route(&self, addr: u32) -> Decision<'_> {
        self.first_match(|block| block.contains(addr))
    }

    /// Route a whole block: the first entry containing all of it wins.
    pub fn route_block(&self, block: &Netmask) -> Decision<'_> {
        self.first_match(|entry_block| entry_block.contains(block))
    }

    fn first_match<F>(&self, matches: F) -> Decision<'_>
    where
        F: Fn(&Netmask) -> bool,
    {
        match self
            .entries
            .iter()
            .find_position(|entry| matches(&entry.block))
        {
            Some((i, entry)) => Decision {
                provider_alias: &entry.provider_alias,
                reason: Reason::Matched,
                entry_index: Some(i),
            },
            None => Decision {
                provider_alias: &self.default_alias,
                reason: Reason::Default,
                entry_index: None,
            },
        }
    }

    pub fn route_ip(&self, addr: Ipv4Addr) -> Decision<'_> {
        self.route(u32::from(addr))
    }

    /// Route an address given as dotted-quad text.
    ///
    /// Text with a '/' or without exactly four octets ("216.240.32") is
    /// routed as a block, like [`Netmask::contains_str`]. Malformed text is
    /// returned as [`RouterError::InvalidAddress`]; the caller decides
    /// whether to fall back to the default.
    pub fn route_str(&self, text: &str) -> Result<Decision<'_>, RouterError> {
        let text = text.trim();
        if text.contains('/') || octet_count(text) != 4 {
            let block = Netmask::parse(text).map_err(|e| match e {
                err @ RouterError::InvalidAddress(_) => err,
                other => RouterError::InvalidAddress(other.to_string()),
            })?;
            return Ok(self.route_block(&block));
        }
        Ok(self.route(parse_address(text)?))
    }
}
