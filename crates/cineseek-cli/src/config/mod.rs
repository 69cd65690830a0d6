//! Application configuration module.
//!
//! Reads the TOML config file holding TMDB credentials and request
//! defaults, then layers environment overrides on top.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig};
