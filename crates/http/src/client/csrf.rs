//! CSRF protection for outgoing requests

use super::error::ClientError;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, Request};
use serde::Deserialize;
use verify_core::csrf::{CsrfSettings, TokenResolver, TokenSource, TokenStore};

/// Body returned by the issuing endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssuedToken {
    #[serde(default)]
    token: String,
    #[serde(default)]
    header_name: Option<String>,
}

/// Last-resort token source: asks the server to issue a token.
///
/// Never fails. Transport errors, non-success statuses and empty bodies all
/// mean "no token". A successful answer is remembered in the token store.
pub struct IssuerSource {
    http: Client,
    url: String,
    store: TokenStore,
}

impl IssuerSource {
    pub fn new(http: Client, url: impl Into<String>, store: TokenStore) -> Self {
        Self {
            http,
            url: url.into(),
            store,
        }
    }
}

#[async_trait(?Send)]
impl TokenSource for IssuerSource {
    fn name(&self) -> &'static str {
        "issuer"
    }

    async fn token(&self) -> Option<String> {
        let request = super::with_credentials(self.http.get(&self.url));
        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, url = %self.url, "csrf token request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %self.url, "csrf token endpoint refused");
            return None;
        }

        let issued: IssuedToken = match response.json().await {
            Ok(issued) => issued,
            Err(error) => {
                tracing::warn!(%error, "csrf token response was not understood");
                return None;
            }
        };
        if issued.token.is_empty() {
            tracing::debug!("csrf token endpoint returned no token");
            return None;
        }
        if let Some(header) = &issued.header_name {
            tracing::debug!(server_header = %header, "csrf token issued");
        }

        self.store.remember(issued.token.clone());
        Some(issued.token)
    }
}

/// Attaches a resolved CSRF token to every mutating request
pub struct CsrfPipeline {
    resolver: TokenResolver,
    header: HeaderName,
    alias: HeaderName,
}

impl CsrfPipeline {
    pub fn new(resolver: TokenResolver, settings: &CsrfSettings) -> Result<Self, ClientError> {
        Ok(Self {
            resolver,
            header: header_name(&settings.header_name)?,
            alias: header_name(&settings.alias_header_name)?,
        })
    }

    /// Add the CSRF headers to `request` unless it is a read-only request.
    ///
    /// Returns whether a token was attached. Without a token the request is
    /// left untouched and the server decides what to do with it.
    pub async fn prepare(&self, request: &mut Request) -> bool {
        if is_read_only(request.method()) {
            return false;
        }

        let Some(token) = self.resolver.resolve().await else {
            tracing::debug!(
                method = %request.method(),
                url = %request.url(),
                "dispatching without csrf token"
            );
            return false;
        };

        let Ok(mut value) = HeaderValue::from_str(&token) else {
            tracing::warn!("resolved csrf token is not a valid header value");
            return false;
        };
        value.set_sensitive(true);

        let headers = request.headers_mut();
        headers.insert(self.alias.clone(), value.clone());
        headers.insert(self.header.clone(), value);
        true
    }
}

fn is_read_only(method: &Method) -> bool {
    method.as_str().eq_ignore_ascii_case(Method::GET.as_str())
}

fn header_name(name: &str) -> Result<HeaderName, ClientError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ClientError::Configuration(format!("invalid header name {name:?}: {e}")))
}
