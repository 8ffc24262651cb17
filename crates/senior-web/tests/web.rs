//! Browser smoke tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use senior_core::effects::PageEffects;
use senior_core::nav::controller::SHOW_MENU_CLASS;
use senior_core::SiteConfig;
use senior_web::bindings::{form_bindings, page_bindings};
use senior_web::config;
use senior_web::{Auth, BrowserEffects, SeniorExpert};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> BrowserEffects {
    let effects = BrowserEffects::new().unwrap();
    let body = effects.body().unwrap();
    body.set_inner_html(html);
    effects
}

#[wasm_bindgen_test]
fn email_ok_matches_core_rule() {
    assert!(Auth::email_ok("ana@x.com"));
    assert!(!Auth::email_ok("a@b"));
}

#[wasm_bindgen_test]
fn bindings_resolve_landing_page() {
    let effects = mount(
        r##"<header id="header"><div id="nav-menu"><a class="nav__link" href="#sobre">Sobre</a></div>
        <div id="nav-toggle"></div></header>
        <section class="section" id="sobre"></section>"##,
    );
    let bindings = page_bindings(&effects);
    assert!(bindings.header.is_some());
    assert_eq!(bindings.nav_links.len(), 1);
    assert_eq!(bindings.sections.len(), 1);
    assert!(bindings.back_to_top.is_none());
}

#[wasm_bindgen_test]
fn form_bindings_skip_honeypot() {
    let effects = mount(
        r#"<form id="loginForm">
            <div><input name="email" required></div>
            <div><input name="password" type="password" required></div>
            <input name="website" type="text">
            <button type="submit">Entrar</button>
        </form>"#,
    );
    let bindings = form_bindings(&effects, "loginForm").unwrap();
    assert_eq!(bindings.fields.len(), 2);
    assert!(bindings.fields.iter().all(|field| field.required));
    assert!(bindings.honeypot.is_some());
    assert!(bindings.submit.is_some());
}

#[wasm_bindgen_test]
fn toggle_menu_through_export() {
    let effects = mount(r#"<div id="nav-menu"></div><div id="nav-toggle"></div>"#);
    let site = SeniorExpert::new().unwrap();
    assert!(site.toggle_mobile_menu().unwrap());

    let menu = effects.element_by_id("nav-menu").unwrap();
    assert!(effects.has_class(&menu, SHOW_MENU_CLASS));
    site.close_mobile_menu().unwrap();
    assert!(!effects.has_class(&menu, SHOW_MENU_CLASS));
}

#[wasm_bindgen_test]
fn malformed_inline_config_keeps_defaults() {
    let effects = mount(r#"<script id="site-config" type="application/json">{ nope</script>"#);
    assert_eq!(*config::load(&effects), SiteConfig::default());
}

#[wasm_bindgen_test]
fn bad_validate_payload_is_reported_as_payload_error() {
    mount("");
    let site = SeniorExpert::new().unwrap();
    let err = site
        .validate_form(wasm_bindgen::JsValue::from_f64(3.0))
        .unwrap_err();
    assert!(err.as_string().unwrap().starts_with("Invalid payload"));
}
