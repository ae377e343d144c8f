//! Page-wide services, injected into the component tree as context

use crate::browser::{DocumentCookies, WindowGlobal};
use std::rc::Rc;
use thiserror::Error;
use verify_core::{ConsoleConfig, NavigationGuard, RouteTable};
use verify_http::{ClientError, ConsoleClient, ConsoleClientBuilder};
use yew::prelude::*;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] ClientError),

    #[error("Route table setup failed: {0}")]
    Routes(#[from] verify_core::Error),
}

/// Everything the guard and the views need to talk to the backend.
///
/// One instance exists per page; clones share it.
#[derive(Clone)]
pub struct ConsoleServices {
    inner: Rc<Inner>,
}

struct Inner {
    config: ConsoleConfig,
    client: ConsoleClient,
    guard: NavigationGuard<ConsoleClient>,
}

impl PartialEq for ConsoleServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ConsoleServices {
    /// Wire up the client and guard for the current page
    pub fn new(config: ConsoleConfig) -> Result<Self, SetupError> {
        let client = ConsoleClientBuilder::from_config(&config)
            .cookie_jar(DocumentCookies)
            .bootstrap_global(WindowGlobal)
            .build()?;
        let table = RouteTable::console(&config.routes)?;
        let guard = NavigationGuard::new(table, config.routes.clone(), client.clone());

        tracing::info!(api = %client.base_url(), "console services ready");
        Ok(Self {
            inner: Rc::new(Inner {
                config,
                client,
                guard,
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Client for API calls; mutating requests carry the CSRF token
    pub fn client(&self) -> &ConsoleClient {
        &self.inner.client
    }

    pub fn guard(&self) -> &NavigationGuard<ConsoleClient> {
        &self.inner.guard
    }
}

#[derive(Properties, PartialEq)]
pub struct ServicesProviderProps {
    pub services: ConsoleServices,
    pub children: Children,
}

#[function_component(ServicesProvider)]
pub fn services_provider(props: &ServicesProviderProps) -> Html {
    html! {
        <ContextProvider<ConsoleServices> context={props.services.clone()}>
            { props.children.clone() }
        </ContextProvider<ConsoleServices>>
    }
}

/// Services of the enclosing `ServicesProvider`
#[hook]
pub fn use_services() -> Option<ConsoleServices> {
    use_context::<ConsoleServices>()
}
