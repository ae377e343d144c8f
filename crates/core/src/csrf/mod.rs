//! CSRF token resolution
//!
//! A token is looked up through an ordered chain of sources: the cookie set
//! by the server, the token published by the page bootstrap, the in-memory
//! cache, and finally the issuing endpoint. The first non-empty answer wins.
//! The cookie always comes first so a rotated token is never masked by a
//! stale cache entry.

pub mod bootstrap;
pub mod cookie;
pub mod source;
pub mod store;

pub use bootstrap::{BootstrapGlobal, NoBootstrap};
pub use cookie::{CookieJar, NoCookies, read_cookie};
pub use source::{BootstrapSource, CacheSource, CookieSource, TokenSource};
pub use store::TokenStore;

use serde::{Deserialize, Serialize};

/// Names of the cookie, headers and endpoint involved in CSRF protection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfSettings {
    pub cookie_name: String,
    pub header_name: String,
    /// Second header carrying the same token, for backends reading the
    /// other naming convention
    pub alias_header_name: String,
    /// Issuing endpoint, relative to the API base
    pub token_path: String,
}

impl Default for CsrfSettings {
    fn default() -> Self {
        Self {
            cookie_name: "XSRF-TOKEN".to_string(),
            header_name: "X-XSRF-TOKEN".to_string(),
            alias_header_name: "X-CSRF-TOKEN".to_string(),
            token_path: "/api/csrf-token".to_string(),
        }
    }
}

/// Ordered, short-circuiting chain of token sources
#[derive(Default)]
pub struct TokenResolver {
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; sources are consulted in insertion order
    #[must_use]
    pub fn with_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard chain: cookie, bootstrap global, cache, then `issuer`
    pub fn standard<J, G>(
        jar: J,
        global: G,
        store: &TokenStore,
        issuer: impl TokenSource + 'static,
        settings: &CsrfSettings,
    ) -> Self
    where
        J: CookieJar + 'static,
        G: BootstrapGlobal + 'static,
    {
        Self::new()
            .with_source(CookieSource::new(jar, settings.cookie_name.clone()))
            .with_source(BootstrapSource::new(global))
            .with_source(CacheSource::new(store.clone()))
            .with_source(issuer)
    }

    /// Names of the configured sources, in order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// First non-empty token, or `None` once every source is exhausted
    pub async fn resolve(&self) -> Option<String> {
        for source in &self.sources {
            if let Some(token) = source.token().await.filter(|t| !t.is_empty()) {
                tracing::debug!(source = source.name(), "csrf token resolved");
                return Some(token);
            }
        }
        tracing::debug!("no csrf token available from any source");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        label: &'static str,
        value: Option<&'static str>,
        calls: Rc<Cell<usize>>,
    }

    #[async_trait(?Send)]
    impl TokenSource for Fixed {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn token(&self) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.value.map(ToString::to_string)
        }
    }

    fn fixed(label: &'static str, value: Option<&'static str>) -> (Fixed, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Fixed {
                label,
                value,
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[tokio::test]
    async fn stops_at_first_non_empty_source() {
        let (first, first_calls) = fixed("first", None);
        let (second, second_calls) = fixed("second", Some("tok"));
        let (third, third_calls) = fixed("third", Some("other"));

        let resolver = TokenResolver::new()
            .with_source(first)
            .with_source(second)
            .with_source(third);

        assert_eq!(resolver.resolve().await.as_deref(), Some("tok"));
        assert_eq!(first_calls.get(), 1);
        assert_eq!(second_calls.get(), 1);
        assert_eq!(third_calls.get(), 0);
    }

    #[tokio::test]
    async fn empty_strings_fall_through() {
        let (empty, _) = fixed("empty", Some(""));
        let (real, _) = fixed("real", Some("tok"));
        let resolver = TokenResolver::new().with_source(empty).with_source(real);
        assert_eq!(resolver.resolve().await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn exhausted_chain_yields_none() {
        let (a, _) = fixed("a", None);
        let resolver = TokenResolver::new().with_source(a);
        assert_eq!(resolver.resolve().await, None);
        assert_eq!(TokenResolver::new().resolve().await, None);
    }

    fn no_cookies() -> cookie::MockCookieJar {
        let mut jar = cookie::MockCookieJar::new();
        jar.expect_cookie_string().returning(|| None);
        jar
    }

    #[tokio::test]
    async fn standard_chain_prefers_cookie_over_cache() {
        let store = TokenStore::new();
        store.remember("stale");

        let mut jar = cookie::MockCookieJar::new();
        jar.expect_cookie_string()
            .returning(|| Some("XSRF-TOKEN=rotated".to_string()));
        let mut global = bootstrap::MockBootstrapGlobal::new();
        global.expect_published_token().times(0);
        let (issuer, issuer_calls) = fixed("issuer", Some("issued"));

        let resolver =
            TokenResolver::standard(jar, global, &store, issuer, &CsrfSettings::default());

        assert_eq!(
            resolver.source_names(),
            vec!["cookie", "bootstrap", "cache", "issuer"]
        );
        assert_eq!(resolver.resolve().await.as_deref(), Some("rotated"));
        assert_eq!(issuer_calls.get(), 0);
    }

    #[tokio::test]
    async fn standard_chain_prefers_bootstrap_over_cache() {
        let store = TokenStore::new();
        store.remember("cached");

        let mut global = bootstrap::MockBootstrapGlobal::new();
        let mut lookups = 0;
        global.expect_published_token().returning(move || {
            lookups += 1;
            (lookups == 1).then(|| "boot".to_string())
        });
        let (issuer, _) = fixed("issuer", None);

        let resolver =
            TokenResolver::standard(no_cookies(), global, &store, issuer, &CsrfSettings::default());
        assert_eq!(resolver.resolve().await.as_deref(), Some("boot"));
        assert_eq!(resolver.resolve().await.as_deref(), Some("cached"));
    }

    #[tokio::test]
    async fn bootstrap_token_published_after_startup_is_used() {
        let store = TokenStore::new();
        let mut global = bootstrap::MockBootstrapGlobal::new();
        let mut lookups = 0;
        global.expect_published_token().times(2).returning(move || {
            lookups += 1;
            (lookups > 1).then(|| "late".to_string())
        });
        let (issuer, issuer_calls) = fixed("issuer", None);

        let resolver =
            TokenResolver::standard(no_cookies(), global, &store, issuer, &CsrfSettings::default());

        assert_eq!(resolver.resolve().await, None);
        assert_eq!(issuer_calls.get(), 1);

        assert_eq!(resolver.resolve().await.as_deref(), Some("late"));
        assert_eq!(issuer_calls.get(), 1);
        assert_eq!(store.cached(), None);
    }
}
