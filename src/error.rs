//! Error types for address parsing, block construction and routing setup.

use thiserror::Error;

/// Errors raised by the address codec, netmask construction and router setup.
///
/// Only [`RouterError::InvalidAddress`] can occur while serving queries; every
/// other variant is an initialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Malformed octet text, out-of-range octet or too many octets.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// Unparseable mask, bitmask > 32 or missing net token.
    #[error("Invalid block spec: {0}")]
    InvalidBlockSpec(String),
    /// Alias referenced by an address block or the default is not a provider.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    /// The host refused to register a required provider.
    #[error("Provider registration failed for {alias}: {message}")]
    ProviderRegistration { alias: String, message: String },
    /// Configuration value out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
