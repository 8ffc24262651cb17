//! # Senior Web
//!
//! Browser entry point for the Senior Expert site. Implements the
//! `senior-core` effect traits over `web-sys`, resolves page elements once,
//! attaches each controller's registration list to real listeners and
//! exports the `SeniorExpert` and `Auth` interfaces to JavaScript.

pub mod bindings;
pub mod boot;
pub mod config;
pub mod dom;
pub mod error;
pub mod exports;
pub mod listeners;
pub mod logging;
pub mod observer;

pub use dom::BrowserEffects;
pub use error::{WebError, WebResult};
pub use exports::{configure, Auth, SeniorExpert};

use wasm_bindgen::prelude::*;

/// Module entry point: install logging and wire the page once it is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init_logging();

    let effects = BrowserEffects::new()?;
    listeners::report_uncaught_errors(&effects)?;
    listeners::on_ready(&effects, || {
        if let Err(err) = boot::boot() {
            tracing::error!("page wiring failed: {}", err);
        }
    })?;
    Ok(())
}
