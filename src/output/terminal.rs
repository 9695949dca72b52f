//! Terminal output of routing decisions.

use crate::models::{Reason, Resolution};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// One line per query: address, provider, cname, ttl and a colored reason.
pub fn format_resolution(address: &str, resolution: &Resolution) -> String {
    let reason = match resolution.reason {
        Reason::Matched => resolution.reason.as_str().green(),
        Reason::Default => resolution.reason.as_str().yellow(),
    };
    format!(
        "{address:>15} -> {alias:<12} {cname:<20} ttl={ttl:<5} {reason}",
        alias = resolution.provider_alias.bold(),
        cname = resolution.cname,
        ttl = resolution.ttl,
    )
}

/// Print the resolution of every address to stdout.
pub fn print_resolutions(results: &[(String, Resolution)]) {
    for (address, resolution) in results {
        println!("{}", format_resolution(address, resolution));
    }
}
