//! CLI library components for the BIDS download validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
