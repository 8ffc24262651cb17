//! Error handling for the browser bindings

use senior_core::SiteError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors raised while wiring the page.
#[derive(Error, Debug)]
pub enum WebError {
    /// JavaScript interop error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A browser global (window, document, body) is unavailable.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value passed from JavaScript does not have the expected shape.
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// Error reported by the page logic.
    #[error(transparent)]
    Core(#[from] SiteError),
}

impl WebError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }

    /// A caller-supplied value failed to deserialize.
    pub fn payload(err: serde_wasm_bindgen::Error) -> Self {
        Self::Payload(err.to_string())
    }

    /// A `configure` argument failed to deserialize.
    pub fn config(err: serde_wasm_bindgen::Error) -> Self {
        Self::Config(err.to_string())
    }

    /// A result could not be converted back into a JavaScript value.
    pub fn conversion(err: serde_wasm_bindgen::Error) -> Self {
        Self::JavaScript(err.to_string())
    }
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::JavaScript(describe(&value))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Map a thrown JavaScript value into a page error for the effect traits.
pub fn js_error(value: JsValue) -> SiteError {
    SiteError::page(describe(&value))
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| "Unknown JavaScript error".to_string())
}

/// Result type for browser wiring.
pub type WebResult<T> = Result<T, WebError>;
