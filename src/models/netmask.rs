//! IPv4 CIDR blocks.
//!
//! Provides [`Netmask`] for representing a normalized address block with its
//! derived boundaries, along with mask helpers and a lazy [`AddressIter`].

use super::address::{format_address, octet_count, parse_address};
use crate::error::RouterError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ip_block_router::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, RouterError> {
    if len > MAX_LENGTH {
        Err(RouterError::InvalidBlockSpec(format!(
            "Network length /{len} is too long"
        )))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Prefix length of a contiguous mask, `None` if the mask has holes.
pub fn mask_prefix_len(mask: u32) -> Option<u8> {
    let len = mask.leading_ones() as u8;
    match get_cidr_mask(len) {
        Ok(expected) if expected == mask => Some(len),
        _ => None,
    }
}

/// Anything a [`Netmask`] can be tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Address(u32),
    Block(Netmask),
}

impl From<u32> for Candidate {
    fn from(addr: u32) -> Self {
        Candidate::Address(addr)
    }
}

impl From<Ipv4Addr> for Candidate {
    fn from(addr: Ipv4Addr) -> Self {
        Candidate::Address(u32::from(addr))
    }
}

impl From<Netmask> for Candidate {
    fn from(block: Netmask) -> Self {
        Candidate::Block(block)
    }
}

impl From<&Netmask> for Candidate {
    fn from(block: &Netmask) -> Self {
        Candidate::Block(*block)
    }
}

/// A normalized IPv4 address block.
///
/// All attributes are derived at construction and never change. For
/// bitmask <= 30 the network and broadcast addresses are excluded from the
/// usable range; /31 and /32 have no such distinction and no broadcast.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Netmask {
    net: u32,
    mask: u32,
    bitmask: u8,
    first: u32,
    last: u32,
    broadcast: Option<u32>,
}

impl Netmask {
    /// Parse "a.b.c.d/n", "a.b.c.d/255.255.255.0" or a bare (partial) address.
    ///
    /// A bare address gets a mask implied by its octet count:
    /// 1 octet -> /8, 2 -> /16, 3 -> /24, 4 -> /32.
    pub fn parse(spec: &str) -> Result<Netmask, RouterError> {
        let spec = spec.trim();
        let mut parts = spec.splitn(3, '/');
        let net = parts.next().unwrap_or_default();
        let mask = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(RouterError::InvalidBlockSpec(format!(
                "Too many '/' in {spec:?}"
            )));
        }

        if mask.is_empty() {
            let bitmask = match octet_count(net) {
                1 => 8,
                2 => 16,
                3 => 24,
                4 => 32,
                _ => {
                    return Err(RouterError::InvalidBlockSpec(format!(
                        "Invalid mask: empty for {spec:?}"
                    )))
                }
            };
            Netmask::from_parts(parse_address(net)?, bitmask)
        } else {
            Netmask::with_mask(net, mask)
        }
    }

    /// Build a block from a net string and a separate mask, either dotted
    /// ("255.255.255.0") or numeric ("24").
    pub fn with_mask(net: &str, mask: &str) -> Result<Netmask, RouterError> {
        let mask = mask.trim();
        if mask.is_empty() {
            return Err(RouterError::InvalidBlockSpec("Invalid mask: empty".into()));
        }

        let bitmask = if mask.contains('.') {
            let mask_long = parse_address(mask)
                .map_err(|_| RouterError::InvalidBlockSpec(format!("Invalid mask: {mask}")))?;
            mask_prefix_len(mask_long).ok_or_else(|| {
                RouterError::InvalidBlockSpec(format!("Invalid mask: {mask} is not contiguous"))
            })?
        } else {
            if !mask.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RouterError::InvalidBlockSpec(format!(
                    "Invalid mask: {mask}"
                )));
            }
            mask.parse::<u8>()
                .map_err(|_| RouterError::InvalidBlockSpec(format!("Invalid mask for ip4: {mask}")))?
        };

        Netmask::from_parts(parse_address(net.trim())?, bitmask)
    }

    /// Build a block from any address inside it and a prefix length.
    pub fn from_parts(addr: u32, bitmask: u8) -> Result<Netmask, RouterError> {
        let mask = get_cidr_mask(bitmask)?;
        let net = addr & mask;
        let top = net | !mask;
        let (first, last, broadcast) = if bitmask <= MAX_LENGTH - 2 {
            (net + 1, top - 1, Some(top))
        } else {
            (net, top, None)
        };

        Ok(Netmask {
            net,
            mask,
            bitmask,
            first,
            last,
            broadcast,
        })
    }

    /// Network address as an integer.
    pub fn net_long(&self) -> u32 {
        self.net
    }

    /// Mask as an integer.
    pub fn mask_long(&self) -> u32 {
        self.mask
    }

    /// Prefix length (0-32).
    pub fn bitmask(&self) -> u8 {
        self.bitmask
    }

    /// Number of addresses in the block, 2^(32 - bitmask).
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.bitmask)
    }

    pub fn base(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.net)
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask)
    }

    pub fn hostmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.mask)
    }

    pub fn first_usable(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.first)
    }

    pub fn last_usable(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last)
    }

    /// Broadcast address, `None` for /31 and /32.
    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        self.broadcast.map(Ipv4Addr::from)
    }

    /// True if `addr` falls anywhere inside the block's mask, network and
    /// broadcast addresses included.
    pub fn covers(&self, addr: u32) -> bool {
        addr & self.mask == self.net
    }

    /// Containment test against a single address or another block.
    ///
    /// An address is contained when it lies in the usable range
    /// `first_usable..=last_usable`. A block is contained when both its
    /// network address and its broadcast (or last usable) address are
    /// covered by this block.
    pub fn contains<C: Into<Candidate>>(&self, candidate: C) -> bool {
        match candidate.into() {
            Candidate::Address(addr) => (self.first..=self.last).contains(&addr),
            Candidate::Block(other) => {
                self.covers(other.net) && self.covers(other.broadcast.unwrap_or(other.last))
            }
        }
    }

    /// Containment test against text.
    ///
    /// Text with a '/' or without exactly four octets is parsed as a block,
    /// anything else as a single address.
    pub fn contains_str(&self, text: &str) -> Result<bool, RouterError> {
        if text.contains('/') || octet_count(text) != 4 {
            Ok(self.contains(Netmask::parse(text)?))
        } else {
            Ok(self.contains(parse_address(text)?))
        }
    }

    /// The block of the same size `count` block-widths ahead.
    pub fn next(&self, count: u32) -> Result<Netmask, RouterError> {
        let next_net = self.net as u64 + self.size() * count as u64;
        let next_net = u32::try_from(next_net).map_err(|_| {
            RouterError::InvalidAddress(format!(
                "{self} + {count} blocks is beyond 255.255.255.255"
            ))
        })?;
        Netmask::from_parts(next_net, self.bitmask)
    }

    /// Lazily walk every usable address, ascending.
    pub fn enumerate(&self) -> AddressIter {
        AddressIter {
            next: self.first as u64,
            last: self.last as u64,
            index: 0,
        }
    }
}

/// Iterator over `(address, integer, index)` for a block's usable range.
#[derive(Debug, Clone)]
pub struct AddressIter {
    next: u64,
    last: u64,
    index: u64,
}

impl Iterator for AddressIter {
    type Item = (Ipv4Addr, u32, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let long = self.next as u32;
        let item = (Ipv4Addr::from(long), long, self.index);
        self.next += 1;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<'a> IntoIterator for &'a Netmask {
    type Item = (Ipv4Addr, u32, u64);
    type IntoIter = AddressIter;

    fn into_iter(self) -> AddressIter {
        self.enumerate()
    }
}

impl FromStr for Netmask {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Netmask::parse(s)
    }
}

impl Serialize for Netmask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Netmask {
    fn deserialize<D>(deserializer: D) -> Result<Netmask, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Netmask::parse(&s).map_err(|e| de::Error::custom(format!("invalid block {s:?}: {e}")))
    }
}

impl std::fmt::Display for Netmask {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", format_address(self.net), self.bitmask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(text: &str) -> Ipv4Addr {
        text.parse().unwrap()
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_mask_prefix_len() {
        assert_eq!(mask_prefix_len(0), Some(0));
        assert_eq!(mask_prefix_len(0xFFFFFF00), Some(24));
        assert_eq!(mask_prefix_len(0xFFFFFFFE), Some(31));
        assert_eq!(mask_prefix_len(u32::MAX), Some(32));
        assert_eq!(mask_prefix_len(0xFF00FF00), None);
        assert_eq!(mask_prefix_len(0x000000FF), None);
    }

    #[test]
    fn test_parse_cidr() {
        let block = Netmask::parse("10.0.0.0/24").unwrap();
        assert_eq!(block.base(), ip("10.0.0.0"));
        assert_eq!(block.bitmask(), 24);
        assert_eq!(block.mask_long(), 0xFFFFFF00);
        assert_eq!(block.mask(), ip("255.255.255.0"));
        assert_eq!(block.hostmask(), ip("0.0.0.255"));
        assert_eq!(block.size(), 256);
        assert_eq!(block.first_usable(), ip("10.0.0.1"));
        assert_eq!(block.last_usable(), ip("10.0.0.254"));
        assert_eq!(block.broadcast(), Some(ip("10.0.0.255")));
        assert_eq!(block.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_parse_clears_host_bits() {
        let block = Netmask::parse("192.168.1.42/16").unwrap();
        assert_eq!(block.net_long(), parse_address("192.168.0.0").unwrap());
        assert_eq!(block.net_long(), parse_address("192.168.1.42").unwrap() & block.mask_long());
        assert_eq!(block.to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_parse_implied_mask() {
        assert_eq!(Netmask::parse("10").unwrap().to_string(), "10.0.0.0/8");
        assert_eq!(Netmask::parse("10.1").unwrap().to_string(), "10.1.0.0/16");
        assert_eq!(Netmask::parse("10.1.2").unwrap().to_string(), "10.1.2.0/24");
        assert_eq!(Netmask::parse("10.1.2.3").unwrap().to_string(), "10.1.2.3/32");
        assert_eq!(Netmask::parse("10.1.2.3/").unwrap().to_string(), "10.1.2.3/32");
    }

    #[test]
    fn test_with_mask() {
        let dotted = Netmask::with_mask("10.1.2.3", "255.255.0.0").unwrap();
        assert_eq!(dotted.to_string(), "10.1.0.0/16");
        let numeric = Netmask::with_mask("10.1.2.3", "16").unwrap();
        assert_eq!(numeric, dotted);
        assert_eq!(Netmask::parse("10.1.2.3/255.255.0.0").unwrap(), dotted);
        assert_eq!(Netmask::with_mask("0.0.0.0", "0.0.0.0").unwrap().bitmask(), 0);
    }

    #[test]
    fn test_invalid_block_spec() {
        let bad_specs = [
            "10.0.0.0/33",
            "10.0.0.0/255.0.255.0",
            "10.0.0.0/255.255.x.0",
            "10.0.0.0/abc",
            "10.0.0.0/-1",
            "10.0.0.0/24/8",
        ];
        for bad in bad_specs {
            assert!(
                matches!(Netmask::parse(bad), Err(RouterError::InvalidBlockSpec(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            Netmask::with_mask("10.0.0.0", "255.0.255.0"),
            Err(RouterError::InvalidBlockSpec(_))
        ));
        assert!(matches!(
            Netmask::with_mask("10.0.0.0", ""),
            Err(RouterError::InvalidBlockSpec(_))
        ));
    }

    #[test]
    fn test_invalid_net_address() {
        assert!(matches!(
            Netmask::parse("999.0.0.0/8"),
            Err(RouterError::InvalidAddress(_))
        ));
        assert!(matches!(
            Netmask::parse("1.2.3.4.5"),
            Err(RouterError::InvalidBlockSpec(_))
        ));
    }

    #[test]
    fn test_slash_31_and_32() {
        let block = Netmask::parse("10.0.0.0/31").unwrap();
        assert_eq!(block.broadcast(), None);
        assert_eq!(block.first_usable(), ip("10.0.0.0"));
        assert_eq!(block.last_usable(), ip("10.0.0.1"));
        assert_eq!(block.size(), 2);
        assert!(block.contains(block.first_usable()));
        assert!(block.contains(block.last_usable()));

        let host = Netmask::parse("216.240.32.100/32").unwrap();
        assert_eq!(host.broadcast(), None);
        assert_eq!(host.first_usable(), ip("216.240.32.100"));
        assert_eq!(host.last_usable(), ip("216.240.32.100"));
        assert!(host.contains(ip("216.240.32.100")));
        assert!(!host.contains(ip("216.240.32.101")));
        assert!(host.contains(host.first_usable()));
        assert!(host.contains(host.last_usable()));
    }

    #[test]
    fn test_slash_0() {
        let all = Netmask::parse("0.0.0.0/0").unwrap();
        assert_eq!(all.size(), 1u64 << 32);
        assert_eq!(all.mask_long(), 0);
        assert_eq!(all.first_usable(), ip("0.0.0.1"));
        assert_eq!(all.last_usable(), ip("255.255.255.254"));
        assert_eq!(all.broadcast(), Some(ip("255.255.255.255")));
        assert!(all.contains(ip("8.8.8.8")));
        assert!(all.contains(all.first_usable()));
        assert!(all.contains(all.last_usable()));
        assert!(all.covers(0));
    }

    #[test]
    fn test_contains_own_usable_range() {
        for bitmask in 0..=MAX_LENGTH {
            let addr = parse_address("172.16.99.77").unwrap();
            let block = Netmask::from_parts(addr, bitmask).unwrap();
            assert!(block.contains(block.first_usable()), "{block}");
            assert!(block.contains(block.last_usable()), "{block}");
        }
    }

    #[test]
    fn test_contains_boundaries() {
        let block = Netmask::parse("10.0.0.0/24").unwrap();
        assert!(!block.contains(ip("10.0.0.0")));
        assert!(block.contains(ip("10.0.0.1")));
        assert!(block.contains(ip("10.0.0.254")));
        assert!(!block.contains(ip("10.0.0.255")));
        assert!(!block.contains(ip("10.0.1.1")));
        assert!(block.contains(block.first_usable()));
        assert!(block.contains(block.last_usable()));
        assert!(block.covers(parse_address("10.0.0.0").unwrap()));
        assert!(block.covers(parse_address("10.0.0.255").unwrap()));
    }

    #[test]
    fn test_contains_integer() {
        let block = Netmask::parse("10.0.0.0/24").unwrap();
        assert!(block.contains(0x0A000001u32));
        assert!(!block.contains(0x0A000100u32));
    }

    #[test]
    fn test_contains_nested() {
        let block = Netmask::parse("10.0.0.0/24").unwrap();
        let low = Netmask::parse("10.0.0.0/25").unwrap();
        let high = Netmask::parse("10.0.0.128/25").unwrap();
        let outside = Netmask::parse("10.0.1.0/25").unwrap();
        assert!(block.contains(low));
        assert!(block.contains(&high));
        assert!(!block.contains(outside));
        assert!(block.contains(block));
        assert!(!low.contains(block));
        assert!(block.contains(Netmask::parse("10.0.0.255/32").unwrap()));
    }

    #[test]
    fn test_contains_str() {
        let block = Netmask::parse("10.0.0.0/24").unwrap();
        assert!(block.contains_str("10.0.0.1").unwrap());
        assert!(!block.contains_str("10.0.0.0").unwrap());
        assert!(block.contains_str("10.0.0.128/25").unwrap());
        assert!(!block.contains_str("10.0.1.0/25").unwrap());
        assert!(Netmask::parse("10.0.0.0/8").unwrap().contains_str("10.0").unwrap());
        assert!(block.contains_str("10.0.0.x").is_err());
    }

    #[test]
    fn test_next() {
        let block = Netmask::parse("10.1.1.0/28").unwrap();
        assert_eq!(block.next(1).unwrap().to_string(), "10.1.1.16/28");
        assert_eq!(block.next(3).unwrap().to_string(), "10.1.1.48/28");
        assert_eq!(block.next(0).unwrap(), block);

        let big = Netmask::parse("192.168.1.0/8").unwrap();
        assert_eq!(big.next(1).unwrap().to_string(), "193.0.0.0/8");

        let last = Netmask::parse("255.255.255.0/24").unwrap();
        assert!(matches!(last.next(1), Err(RouterError::InvalidAddress(_))));
        assert!(Netmask::parse("0.0.0.0/0").unwrap().next(1).is_err());
    }

    #[test]
    fn test_enumerate() {
        let block = Netmask::parse("10.0.0.0/30").unwrap();
        let items: Vec<_> = block.enumerate().collect();
        assert_eq!(
            items,
            vec![
                (ip("10.0.0.1"), 0x0A000001, 0),
                (ip("10.0.0.2"), 0x0A000002, 1)
            ]
        );
        // restartable
        assert_eq!(block.enumerate().count(), 2);
        assert_eq!((&block).into_iter().count(), 2);

        assert_eq!(Netmask::parse("10.0.0.0/24").unwrap().enumerate().count(), 254);
        assert_eq!(Netmask::parse("10.0.0.0/31").unwrap().enumerate().count(), 2);
        assert_eq!(Netmask::parse("10.0.0.7/32").unwrap().enumerate().count(), 1);
    }

    #[test]
    fn test_enumerate_is_lazy() {
        let all = Netmask::parse("0.0.0.0/0").unwrap();
        let mut iter = all.enumerate();
        assert_eq!(iter.next(), Some((ip("0.0.0.1"), 1, 0)));
        assert_eq!(iter.nth(1), Some((ip("0.0.0.3"), 3, 2)));
        let top = Netmask::parse("255.255.255.252/30").unwrap();
        let last: Vec<_> = top.enumerate().map(|(addr, _, _)| addr).collect();
        assert_eq!(last, vec![ip("255.255.255.253"), ip("255.255.255.254")]);
    }

    #[test]
    fn test_serde() {
        let block: Netmask = serde_json::from_str("\"216.240.33.128/25\"").unwrap();
        assert_eq!(block.to_string(), "216.240.33.128/25");
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"216.240.33.128/25\"");
        assert!(serde_json::from_str::<Netmask>("\"10.0.0.0/40\"").is_err());
    }
}
