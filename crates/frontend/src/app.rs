use crate::views::View;
use verify_frontend_common::{ConsoleServices, RouteGuard, ServicesProvider};
use yew::prelude::*;
use yew_router::prelude::*;

/// Client-side routes; guarding is driven by `verify_core::RouteTable`
#[derive(Routable, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/apps")]
    Apps,
    #[at("/cards")]
    Cards,
    #[at("/app-settings")]
    AppSettings,
    #[at("/callback")]
    Callback,
    #[at("/api-docs")]
    ApiDocs,
    #[at("/hook-management")]
    HookManagement,
    #[at("/hook-edit")]
    HookEdit,
    #[at("/hook-edit/:id")]
    HookEditItem { id: String },
    #[at("/java-editor")]
    JavaEditor,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// View mounted for this route
    pub const fn view(&self) -> &'static str {
        match self {
            Self::Home | Self::Apps => "apps",
            Self::Cards => "cards",
            Self::AppSettings => "app-settings",
            Self::Callback => "callback",
            Self::ApiDocs => "api-docs",
            Self::HookManagement => "hook-management",
            Self::HookEdit | Self::HookEditItem { .. } => "hook-edit",
            Self::JavaEditor => "java-editor",
            Self::Login => "login",
            Self::Register => "register",
            Self::NotFound => "not-found",
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn switch(route: Route) -> Html {
    let item = match &route {
        Route::HookEditItem { id } => Some(AttrValue::from(id.clone())),
        _ => None,
    };
    html! { <View name={route.view()} {item} /> }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub services: ConsoleServices,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <ServicesProvider services={props.services.clone()}>
            <BrowserRouter>
                <RouteGuard<Route>>
                    <Switch<Route> render={switch} />
                </RouteGuard<Route>>
            </BrowserRouter>
        </ServicesProvider>
    }
}
