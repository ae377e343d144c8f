//! Frontend configuration

use crate::browser::page_origin;
use verify_core::ConsoleConfig;

/// Defaults compiled into the bundle
pub const EMBEDDED_CONFIG: &str = include_str!("../console.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn embedded_config() -> ConsoleConfig {
    ConsoleConfig::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|error| {
        tracing::warn!(%error, "embedded console config rejected, using defaults");
        ConsoleConfig::default()
    })
}

/// Configuration for the running page: an empty `base_url` becomes the page
/// origin so the API is reached on the same site
pub fn load_config() -> ConsoleConfig {
    let config = embedded_config();
    if config.base_url.is_empty() {
        config.with_base_url(page_origin())
    } else {
        config
    }
}
