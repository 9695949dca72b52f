//! Dotted-quad IPv4 text <-> `u32` conversion.
//!
//! Accepts partial addresses: "10" and "10.1" are padded with zero octets,
//! so they parse to `10.0.0.0` and `10.1.0.0`.

use crate::error::RouterError;
use itertools::Itertools;

/// Maximum number of octets in an IPv4 address.
pub const MAX_OCTETS: usize = 4;

/// Parse dotted-quad (or partial dotted-quad) text into a `u32`.
///
/// # Examples
/// ```
/// use ip_block_router::models::parse_address;
/// assert_eq!(parse_address("10.0.0.1").unwrap(), 0x0A000001);
/// assert_eq!(parse_address("10").unwrap(), 0x0A000000);
/// ```
pub fn parse_address(text: &str) -> Result<u32, RouterError> {
    let tokens: Vec<&str> = text.split('.').collect();
    if tokens.len() > MAX_OCTETS {
        return Err(RouterError::InvalidAddress(format!(
            "too many octets in {text:?}"
        )));
    }

    let mut addr: u32 = 0;
    for i in 0..MAX_OCTETS {
        let octet = match tokens.get(i) {
            Some(token) => parse_octet(token).ok_or_else(|| {
                RouterError::InvalidAddress(format!("invalid byte {token:?} in {text:?}"))
            })?,
            None => 0,
        };
        addr = (addr << 8) | octet as u32;
    }
    Ok(addr)
}

/// Number of dot-separated tokens, used to derive an implied mask.
pub fn octet_count(text: &str) -> usize {
    text.split('.').count()
}

fn parse_octet(token: &str) -> Option<u8> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // u8 parsing rejects anything above 255
    token.parse::<u8>().ok()
}

/// Render a `u32` as four big-endian octets joined by '.'.
pub fn format_address(addr: u32) -> String {
    addr.to_be_bytes().iter().join(".")
}
