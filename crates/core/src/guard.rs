//! Navigation guard
//!
//! The guard is a pure decision function over a route table and a session
//! probe. Applying the decision to the router is left to a thin adapter in
//! the browser crate.

use crate::config::RouteSettings;
use crate::error::Result;
use crate::routes::{RouteAccess, RouteTable};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Body of the session-status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SessionStatus {
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
        }
    }
}

/// Source of truth for "is this browser session signed in"
#[async_trait(?Send)]
pub trait SessionProbe {
    async fn session_status(&self) -> Result<SessionStatus>;
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect {
        path: String,
        query: Vec<(String, String)>,
    },
}

impl NavigationDecision {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Redirect target as `path?key=value`, or `None` for `Allow`
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::Redirect { path, query } if query.is_empty() => Some(path.clone()),
            Self::Redirect { path, query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish();
                Some(format!("{path}?{encoded}"))
            }
        }
    }
}

/// Decides allow/redirect for every navigation
pub struct NavigationGuard<P> {
    table: RouteTable,
    settings: RouteSettings,
    probe: P,
}

impl<P: SessionProbe> NavigationGuard<P> {
    pub const fn new(table: RouteTable, settings: RouteSettings, probe: P) -> Self {
        Self {
            table,
            settings,
            probe,
        }
    }

    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide what happens to a navigation towards `full_path`
    /// (path plus optional query string and fragment).
    ///
    /// Protected destinations and the login/register pages query the probe
    /// exactly once. Other public destinations never do.
    pub async fn decide(&self, full_path: &str) -> NavigationDecision {
        let decision = match self.table.access(full_path) {
            RouteAccess::Public => NavigationDecision::Allow,
            RouteAccess::Protected => {
                if self.is_authenticated().await {
                    NavigationDecision::Allow
                } else {
                    NavigationDecision::Redirect {
                        path: self.settings.login.clone(),
                        query: vec![(self.settings.redirect_param.clone(), full_path.to_string())],
                    }
                }
            }
            RouteAccess::AuthPage => {
                if self.is_authenticated().await {
                    NavigationDecision::redirect(self.settings.landing.clone())
                } else {
                    NavigationDecision::Allow
                }
            }
        };

        tracing::debug!(destination = %full_path, ?decision, "navigation decided");
        decision
    }

    // Fails closed: any probe error counts as signed out.
    async fn is_authenticated(&self) -> bool {
        match self.probe.session_status().await {
            Ok(status) => status.authenticated,
            Err(error) => {
                tracing::warn!(%error, "session status unavailable, treating as signed out");
                false
            }
        }
    }
}
