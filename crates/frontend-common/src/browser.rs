//! Thin wrappers over the browser globals the console reads

use verify_core::{BootstrapGlobal, CookieJar};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, window};

/// Global a server-rendered bootstrap script may set before the app starts
pub const BOOTSTRAP_TOKEN_GLOBAL: &str = "__XSRF_TOKEN__";

/// `document.cookie` of the current page
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

impl CookieJar for DocumentCookies {
    fn cookie_string(&self) -> Option<String> {
        let document = window()?.document()?.dyn_into::<HtmlDocument>().ok()?;
        document.cookie().ok()
    }
}

/// Token published on `window` by the page bootstrap, if it is a
/// non-empty string
pub fn read_bootstrap_token() -> Option<String> {
    let window = window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(BOOTSTRAP_TOKEN_GLOBAL))
        .ok()?
        .as_string()
        .filter(|token| !token.is_empty())
}

/// `window.__XSRF_TOKEN__`, read on every lookup so a token published
/// after the app started is still picked up
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowGlobal;

impl BootstrapGlobal for WindowGlobal {
    fn published_token(&self) -> Option<String> {
        read_bootstrap_token()
    }
}

/// Origin of the page, or an empty string outside a browsing context
pub fn page_origin() -> String {
    window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}
