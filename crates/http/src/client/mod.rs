//! Verify console HTTP client

pub mod csrf;
pub mod error;
pub mod session;

use csrf::{CsrfPipeline, IssuerSource};
use error::ClientError;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use verify_core::ConsoleConfig;
use verify_core::csrf::{
    BootstrapGlobal, CookieJar, CsrfSettings, NoBootstrap, NoCookies, TokenResolver, TokenStore,
};

/// Console API client.
///
/// Every request goes through the CSRF pipeline before it is sent; responses
/// come back exactly as the server produced them. Clones share the same
/// pipeline and token store.
#[derive(Clone)]
pub struct ConsoleClient {
    inner: Rc<Inner>,
}

struct Inner {
    client: Client,
    base_url: String,
    session_path: String,
    csrf: CsrfPipeline,
}

impl ConsoleClient {
    /// Create a new client builder
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Create a request builder for `path`, sending credentials along
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        with_credentials(self.inner.client.request(method, url))
    }

    /// Send a request through the CSRF pipeline.
    ///
    /// The response is returned unchanged, whatever its status. Only errors
    /// building or transporting the request are reported.
    pub async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let mut request = request.build()?;
        self.inner.csrf.prepare(&mut request).await;
        Ok(self.inner.client.execute(request).await?)
    }

    /// Execute a request and decode a JSON body, mapping error statuses
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for `ConsoleClient`
#[derive(Default)]
pub struct ConsoleClientBuilder {
    base_url: Option<String>,
    session_path: Option<String>,
    csrf: CsrfSettings,
    jar: Option<Box<dyn CookieJar>>,
    global: Option<Box<dyn BootstrapGlobal>>,
    store: Option<TokenStore>,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Option<Duration>,
    #[cfg(not(target_arch = "wasm32"))]
    user_agent: Option<String>,
}

impl ConsoleClientBuilder {
    /// Start from a console configuration
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::default()
            .base_url(config.api_base())
            .session_path(config.session_path.clone())
            .csrf(config.csrf.clone())
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the session-status path
    #[must_use]
    pub fn session_path(mut self, path: impl Into<String>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn csrf(mut self, settings: CsrfSettings) -> Self {
        self.csrf = settings;
        self
    }

    /// Where the CSRF cookie is read from
    #[must_use]
    pub fn cookie_jar(mut self, jar: impl CookieJar + 'static) -> Self {
        self.jar = Some(Box::new(jar));
        self
    }

    /// Where the token published by the page bootstrap is read from
    #[must_use]
    pub fn bootstrap_global(mut self, global: impl BootstrapGlobal + 'static) -> Self {
        self.global = Some(Box::new(global));
        self
    }

    /// Share an existing token store instead of creating one
    #[must_use]
    pub fn token_store(mut self, store: TokenStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent; browsers always send their own
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ConsoleClient, ClientError> {
        let base_url = self
            .base_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder = client_builder.user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("verify-console/", env!("CARGO_PKG_VERSION")).into()),
            );
        }

        let client = client_builder.build()?;
        let store = self.store.unwrap_or_default();
        let jar = self
            .jar
            .unwrap_or_else(|| Box::new(NoCookies) as Box<dyn CookieJar>);
        let global = self
            .global
            .unwrap_or_else(|| Box::new(NoBootstrap) as Box<dyn BootstrapGlobal>);

        let issuer = IssuerSource::new(
            client.clone(),
            format!("{base_url}{}", self.csrf.token_path),
            store.clone(),
        );
        let resolver = TokenResolver::standard(jar, global, &store, issuer, &self.csrf);
        let csrf = CsrfPipeline::new(resolver, &self.csrf)?;

        Ok(ConsoleClient {
            inner: Rc::new(Inner {
                client,
                base_url,
                session_path: self
                    .session_path
                    .unwrap_or_else(|| ConsoleConfig::default().session_path),
                csrf,
            }),
        })
    }
}

/// Include cookies with the request; browsers omit them cross-origin otherwise
#[cfg(target_arch = "wasm32")]
pub(crate) fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}
