//! Token sources consulted by the resolver

use super::bootstrap::BootstrapGlobal;
use super::cookie::{CookieJar, read_cookie};
use super::store::TokenStore;
use async_trait::async_trait;

/// One place a CSRF token may be found
#[async_trait(?Send)]
pub trait TokenSource {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    async fn token(&self) -> Option<String>;
}

/// Reads the token cookie set by the server
pub struct CookieSource<J> {
    jar: J,
    cookie_name: String,
}

impl<J: CookieJar> CookieSource<J> {
    pub fn new(jar: J, cookie_name: impl Into<String>) -> Self {
        Self {
            jar,
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait(?Send)]
impl<J: CookieJar> TokenSource for CookieSource<J> {
    fn name(&self) -> &'static str {
        "cookie"
    }

    async fn token(&self) -> Option<String> {
        read_cookie(&self.jar.cookie_string()?, &self.cookie_name)
    }
}

/// Token handed over by the page bootstrap, read on every lookup
pub struct BootstrapSource<G> {
    global: G,
}

impl<G: BootstrapGlobal> BootstrapSource<G> {
    pub const fn new(global: G) -> Self {
        Self { global }
    }
}

#[async_trait(?Send)]
impl<G: BootstrapGlobal> TokenSource for BootstrapSource<G> {
    fn name(&self) -> &'static str {
        "bootstrap"
    }

    async fn token(&self) -> Option<String> {
        self.global
            .published_token()
            .filter(|token| !token.is_empty())
    }
}

/// Token remembered from an earlier issuing-endpoint call
pub struct CacheSource {
    store: TokenStore,
}

impl CacheSource {
    pub const fn new(store: TokenStore) -> Self {
        Self { store }
    }
}

#[async_trait(?Send)]
impl TokenSource for CacheSource {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn token(&self) -> Option<String> {
        self.store.cached()
    }
}
