//! Address-to-provider routing.
//!
//! - [`router`] - first-match-wins scan over ordered address blocks
//! - [`service`] - initialization and per-query resolution for the host

mod router;
mod service;

pub use router::{Decision, OrderedRouter};
pub use service::{ProviderRegistry, RequiredProviders, RoutingService};
