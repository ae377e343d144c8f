//! Console configuration
//!
//! Every field carries a default so an empty document is a valid
//! configuration. Values are layered with the `config` crate, which lets the
//! browser build embed a TOML file and still override single keys.

use crate::csrf::CsrfSettings;
use crate::error::Result;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Top-level console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Origin of the backend, e.g. `https://console.example.com`.
    /// Empty means "same origin" and is filled in by the browser shell.
    pub base_url: String,
    /// Servlet context path the backend is mounted under
    pub context_path: String,
    /// Session-status endpoint, relative to the API base
    pub session_path: String,
    /// Log level filter for the browser console subscriber
    pub log_level: String,
    pub routes: RouteSettings,
    pub csrf: CsrfSettings,
}

/// Well-known navigation targets used by the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    pub login: String,
    pub register: String,
    /// Where an authenticated user lands instead of the login form
    pub landing: String,
    /// Query key carrying the originally requested path on redirect-to-login
    pub redirect_param: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            context_path: "/verfiy".to_string(),
            session_path: "/api/auth/me".to_string(),
            log_level: "info".to_string(),
            routes: RouteSettings::default(),
            csrf: CsrfSettings::default(),
        }
    }
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            register: "/register".to_string(),
            landing: "/apps".to_string(),
            redirect_param: "redirect".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a TOML document, filling unspecified keys with defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Replace the backend origin, keeping everything else
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL every API path is appended to
    pub fn api_base(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.context_path.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ConsoleConfig::from_toml_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.routes.landing, "/apps");
        assert_eq!(config.csrf.cookie_name, "XSRF-TOKEN");
    }

    #[test]
    fn partial_document_overrides_single_keys() {
        let raw = r#"
            base_url = "https://console.example.com/"
            context_path = "/api-root"

            [routes]
            landing = "/cards"

            [csrf]
            alias_header_name = "X-Token"
        "#;
        let config = ConsoleConfig::from_toml_str(raw).unwrap();

        assert_eq!(config.routes.landing, "/cards");
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.csrf.alias_header_name, "X-Token");
        assert_eq!(config.csrf.header_name, "X-XSRF-TOKEN");
        assert_eq!(config.api_base(), "https://console.example.com/api-root");
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(ConsoleConfig::from_toml_str("routes = [").is_err());
    }

    #[test]
    fn same_origin_api_base_is_relative() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api_base(), "/verfiy");
        assert_eq!(
            config.with_base_url("http://localhost:8084").api_base(),
            "http://localhost:8084/verfiy"
        );
    }
}
