//! Shared utilities for inventory validation crates.

mod any_value;
mod normalize;

pub use any_value::{any_to_raw, any_to_string, column_to_raw};
pub use normalize::{
    is_empty, normalize_header, normalize_raw, normalize_value, parse_number, to_number,
};
