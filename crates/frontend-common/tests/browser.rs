//! Browser adapter tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use verify_core::CookieJar;
use verify_core::csrf::{BootstrapSource, CookieSource, CsrfSettings, NoCookies, TokenResolver};
use verify_frontend_common::browser::{
    BOOTSTRAP_TOKEN_GLOBAL, DocumentCookies, WindowGlobal, read_bootstrap_token,
};
use verify_frontend_common::config::embedded_config;
use verify_http::client::csrf::CsrfPipeline;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlDocument;

wasm_bindgen_test_configure!(run_in_browser);

fn set_global(value: &JsValue) {
    let window = web_sys::window().unwrap();
    js_sys::Reflect::set(&window, &JsValue::from_str(BOOTSTRAP_TOKEN_GLOBAL), value).unwrap();
}

#[wasm_bindgen_test]
fn document_cookies_expose_the_csrf_cookie() {
    let document: HtmlDocument = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .dyn_into()
        .unwrap();
    document.set_cookie("XSRF-TOKEN=from-cookie; path=/").unwrap();

    let cookies = DocumentCookies.cookie_string().unwrap();
    assert_eq!(
        verify_core::csrf::read_cookie(&cookies, "XSRF-TOKEN").as_deref(),
        Some("from-cookie")
    );
}

#[wasm_bindgen_test]
fn bootstrap_global_must_be_a_non_empty_string() {
    set_global(&JsValue::from_str("boot-token"));
    assert_eq!(read_bootstrap_token().as_deref(), Some("boot-token"));

    set_global(&JsValue::from_str(""));
    assert_eq!(read_bootstrap_token(), None);

    set_global(&JsValue::from_f64(42.0));
    assert_eq!(read_bootstrap_token(), None);

    set_global(&JsValue::UNDEFINED);
    assert_eq!(read_bootstrap_token(), None);
}

#[wasm_bindgen_test]
fn embedded_config_is_valid() {
    let config = embedded_config();
    assert_eq!(config.routes.landing, "/apps");
    assert_eq!(config.csrf.alias_header_name, "X-CSRF-TOKEN");
}

fn post() -> reqwest::Request {
    reqwest::Request::new(
        reqwest::Method::POST,
        reqwest::Url::parse("http://localhost/verfiy/api/apps").unwrap(),
    )
}

#[wasm_bindgen_test]
async fn bootstrap_token_published_after_setup_is_attached() {
    set_global(&JsValue::UNDEFINED);
    let resolver = TokenResolver::new()
        .with_source(CookieSource::new(NoCookies, "XSRF-TOKEN"))
        .with_source(BootstrapSource::new(WindowGlobal));
    let pipeline = CsrfPipeline::new(resolver, &CsrfSettings::default()).unwrap();

    let mut before = post();
    assert!(!pipeline.prepare(&mut before).await);
    assert!(before.headers().is_empty());

    set_global(&JsValue::from_str("late-token"));
    let mut after = post();
    assert!(pipeline.prepare(&mut after).await);
    assert_eq!(after.headers()["x-xsrf-token"], "late-token");
    assert_eq!(after.headers()["x-csrf-token"], "late-token");

    set_global(&JsValue::UNDEFINED);
}
