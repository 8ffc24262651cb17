//! Section reveal observer

use crate::dom::BrowserEffects;
use crate::error::WebResult;
use senior_core::NavController;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Observe every section and fade each in on its first intersection.
pub fn observe_sections(nav: &Rc<NavController<BrowserEffects>>) -> WebResult<()> {
    if nav.reveal_targets().is_empty() {
        return Ok(());
    }

    let controller = Rc::clone(nav);
    let callback: Closure<dyn Fn(js_sys::Array, IntersectionObserver)> = Closure::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let section = entry.target();
                match controller.on_intersection(&section, entry.is_intersecting()) {
                    Ok(true) => observer.unobserve(&section),
                    Ok(false) => {}
                    Err(err) => tracing::debug!("reveal failed: {}", err),
                }
            }
        },
    );

    let config = nav.config();
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for section in nav.reveal_targets() {
        observer.observe(section);
    }
    callback.forget();

    tracing::debug!("observing {} sections", nav.reveal_targets().len());
    Ok(())
}
