//! Exported JavaScript interface
//!
//! `SeniorExpert` exposes the landing-page operations, `Auth` the auth-page
//! initialisers. Both act on the live page through fresh controllers built
//! from the current bindings.

use crate::bindings::page_bindings;
use crate::boot::init_auth;
use crate::config;
use crate::dom::BrowserEffects;
use crate::error::WebError;
use senior_core::forms::{
    email_ok, validate_contact, SubmissionOutcome, SubmissionRequest, SubmissionTransport,
};
use senior_core::{AuthFormKind, ContactPayload, NavController, SimulatedTransport};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Result handed back by `sendForm`.
#[derive(Debug, Serialize)]
struct SendResult {
    success: bool,
    message: String,
}

impl From<SubmissionOutcome> for SendResult {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message().to_string(),
        }
    }
}

/// Landing-page operations.
#[wasm_bindgen]
pub struct SeniorExpert {
    nav: Rc<NavController<BrowserEffects>>,
    transport: Rc<SimulatedTransport<BrowserEffects>>,
}

#[wasm_bindgen]
impl SeniorExpert {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SeniorExpert, JsValue> {
        let effects = BrowserEffects::new()?;
        let config = config::load(&effects);
        let nav = Rc::new(NavController::new(
            effects.clone(),
            config.clone(),
            page_bindings(&effects),
        ));
        Ok(Self {
            nav,
            transport: Rc::new(SimulatedTransport::new(effects, config)),
        })
    }

    #[wasm_bindgen(js_name = toggleMobileMenu)]
    pub fn toggle_mobile_menu(&self) -> Result<bool, JsValue> {
        Ok(self.nav.toggle_mobile_menu().map_err(WebError::from)?)
    }

    #[wasm_bindgen(js_name = closeMobileMenu)]
    pub fn close_mobile_menu(&self) -> Result<(), JsValue> {
        Ok(self.nav.close_mobile_menu().map_err(WebError::from)?)
    }

    /// Returns the offset scrolled to, or `undefined` for an unknown id.
    #[wasm_bindgen(js_name = smoothScrollTo)]
    pub fn smooth_scroll_to(&self, target_id: &str) -> Option<f64> {
        self.nav.smooth_scroll_to(target_id)
    }

    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&self) {
        self.nav.scroll_to_top();
    }

    /// Validate `{ nome, email, mensagem, lgpd }`; resolves to the list of
    /// error messages (empty when valid).
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, data: JsValue) -> Result<JsValue, JsValue> {
        let payload: ContactPayload =
            serde_wasm_bindgen::from_value(data).map_err(WebError::payload)?;
        let messages: Vec<String> = validate_contact(&payload, self.nav.config())
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&messages).map_err(WebError::conversion)?)
    }

    /// Simulated send; resolves to `{ success, message }`.
    #[wasm_bindgen(js_name = sendForm)]
    pub fn send_form(&self, data: JsValue) -> Result<js_sys::Promise, JsValue> {
        let payload: ContactPayload =
            serde_wasm_bindgen::from_value(data).map_err(WebError::payload)?;
        let transport = self.transport.clone();
        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let outcome = transport
                .deliver(&SubmissionRequest::Contact(payload))
                .await
                .map_err(WebError::from)?;
            let result = SendResult::from(outcome);
            Ok(serde_wasm_bindgen::to_value(&result).map_err(WebError::conversion)?)
        }))
    }
}

/// Auth-page operations.
#[wasm_bindgen]
pub struct Auth;

#[wasm_bindgen]
impl Auth {
    /// Wire the login form. Resolves to `false` if the page has none.
    #[wasm_bindgen(js_name = initLogin)]
    pub fn init_login() -> Result<bool, JsValue> {
        Self::init(AuthFormKind::Login)
    }

    #[wasm_bindgen(js_name = initSignup)]
    pub fn init_signup() -> Result<bool, JsValue> {
        Self::init(AuthFormKind::Signup)
    }

    #[wasm_bindgen(js_name = initForgot)]
    pub fn init_forgot() -> Result<bool, JsValue> {
        Self::init(AuthFormKind::Forgot)
    }

    #[wasm_bindgen(js_name = emailOk)]
    pub fn email_ok(email: &str) -> bool {
        email_ok(email)
    }

    fn init(kind: AuthFormKind) -> Result<bool, JsValue> {
        let effects = BrowserEffects::new()?;
        let config = config::load(&effects);
        Ok(init_auth(&effects, &config, kind)?)
    }
}

/// Override the site configuration. Accepts a JSON string or a plain object
/// with camelCase keys; omitted keys keep their defaults.
#[wasm_bindgen]
pub fn configure(value: JsValue) -> Result<(), JsValue> {
    let config = match value.as_string() {
        Some(json) => senior_core::SiteConfig::from_json(&json).map_err(WebError::from)?,
        None => serde_wasm_bindgen::from_value(value).map_err(WebError::config)?,
    };
    Ok(config::set_override(config)?)
}
