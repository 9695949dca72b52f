//! Output formatting for routing decisions.
//!
//! - [`csv`] - CSV output
//! - [`terminal`] - terminal output with colors

mod csv;
mod terminal;

pub use csv::{csv_header, escape_csv_field, print_resolutions_csv, resolution_csv_row};
pub use terminal::{format_field, format_resolution, print_resolutions};
