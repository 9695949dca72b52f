//! Domain models for IP block routing.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`parse_address`] / [`format_address`] - IPv4 text <-> integer codec
//! - [`Netmask`] - IPv4 CIDR block with derived boundaries
//! - [`RouteEntry`], [`Reason`] and [`Resolution`] - routing table and results

mod address;
mod netmask;
mod route;

// Re-export public types
pub use address::{format_address, octet_count, parse_address, MAX_OCTETS};
pub use netmask::{get_cidr_mask, mask_prefix_len, AddressIter, Candidate, Netmask, MAX_LENGTH};
pub use route::{Reason, Resolution, RouteEntry};
