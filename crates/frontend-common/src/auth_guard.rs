//! Route guard component
//!
//! Applies `NavigationGuard` decisions to the router. The decision itself is
//! made in `verify_core::guard`; this component only runs it on every
//! location change and performs the redirect.

use crate::services::use_services;
use verify_core::NavigationDecision;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    pub children: Children,
}

#[derive(Clone, Debug, PartialEq)]
enum GuardState {
    Pending,
    Allowed(String),
}

/// Renders its children only once the current location has been allowed.
/// `R` is the app's route enum, used to perform redirects.
#[function_component(RouteGuard)]
pub fn route_guard<R>(props: &RouteGuardProps) -> Html
where
    R: Routable + 'static,
{
    let services = use_services();
    let navigator = use_navigator();
    let location = use_location();
    let state = use_state(|| GuardState::Pending);

    let full_path = location
        .as_ref()
        .map(|location| {
            format!(
                "{}{}{}",
                location.path(),
                location.query_str(),
                location.hash()
            )
        })
        .unwrap_or_default();

    {
        let state = state.clone();
        use_effect_with(full_path.clone(), move |full_path| {
            let full_path = full_path.clone();
            let (Some(services), Some(navigator)) = (services, navigator) else {
                tracing::error!("route guard mounted outside of services provider or router");
                return;
            };

            state.set(GuardState::Pending);
            spawn_local(async move {
                match services.guard().decide(&full_path).await {
                    NavigationDecision::Allow => state.set(GuardState::Allowed(full_path)),
                    NavigationDecision::Redirect { path, query } => {
                        redirect::<R>(&navigator, &path, &query);
                    }
                }
            });
        });
    }

    if *state == GuardState::Allowed(full_path) {
        html! { <>{ props.children.clone() }</> }
    } else {
        html! {}
    }
}

/// Route a redirect lands on; unknown targets fall back to the not-found
/// route so the page never stays blank
fn redirect_target<R: Routable>(path: &str) -> Option<R> {
    R::recognize(path).or_else(|| {
        tracing::warn!(%path, "redirect target is not a known route");
        R::not_found_route()
    })
}

fn redirect<R: Routable>(navigator: &Navigator, path: &str, query: &[(String, String)]) {
    let Some(route) = redirect_target::<R>(path) else {
        tracing::error!(%path, "redirect target unknown and no not-found route defined");
        return;
    };

    let result = if query.is_empty() {
        navigator.replace(&route);
        Ok(())
    } else {
        navigator.replace_with_query(&route, &query)
    };

    if let Err(error) = result {
        tracing::warn!(%path, %error, "redirect failed");
    }
}
