//! Configuration utilities.

/// TOML-based configuration loading (`tally.toml`).
pub mod config;
