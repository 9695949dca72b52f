//! CSV output of routing decisions.

use super::terminal::format_field;
use crate::models::Resolution;

/// Double any embedded quotes; [`format_field`] adds the outer pair.
pub fn escape_csv_field(input: &str) -> String {
    input.replace('"', "\"\"")
}

/// Header row matching [`resolution_csv_row`].
pub fn csv_header() -> String {
    [
        format_field("address", 17),
        format_field("provider", 14),
        format_field("cname", 22),
        format_field("ttl", 6),
        format_field("reason", 9),
    ]
    .join(",")
}

/// One CSV row for a resolved address.
pub fn resolution_csv_row(address: &str, resolution: &Resolution) -> String {
    [
        format_field(escape_csv_field(address), 17),
        format_field(escape_csv_field(&resolution.provider_alias), 14),
        format_field(escape_csv_field(&resolution.cname), 22),
        format_field(resolution.ttl, 6),
        format_field(resolution.reason, 9),
    ]
    .join(",")
}

/// Print the header and one row per resolved address to stdout.
pub fn print_resolutions_csv(results: &[(String, Resolution)]) {
    println!("{}", csv_header());
    for (address, resolution) in results {
        println!("{}", resolution_csv_row(address, resolution));
    }
}
