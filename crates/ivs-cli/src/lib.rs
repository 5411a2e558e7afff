//! CLI library components for the inventory validator.

pub mod logging;
pub mod pipeline;
