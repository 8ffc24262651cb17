//! DOM listener wiring
//!
//! Turns a controller's registration list into real event listeners. Each
//! listener translates the raw event into an [`EventContext`], calls back
//! into the controller, and honours the returned [`Dispatch`]. Listeners live
//! for the lifetime of the page, so their closures are leaked.

use crate::dom::BrowserEffects;
use crate::error::WebResult;
use senior_core::error::report_script_error;
use senior_core::{Dispatch, EventContext, EventKind, ListenerTarget, Registration};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ErrorEvent, Event, EventTarget, KeyboardEvent};

/// What a controller learns from a raw DOM event.
pub fn event_context(event: &Event) -> EventContext<Element> {
    EventContext {
        target: event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok()),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

/// Attach every registration, routing events to `handler`.
pub fn attach<A, F>(
    effects: &BrowserEffects,
    registrations: Vec<Registration<Element, A>>,
    handler: F,
) -> WebResult<()>
where
    A: 'static,
    F: Fn(&A, &EventContext<Element>) -> Dispatch + 'static,
{
    let handler = Rc::new(handler);
    let count = registrations.len();

    for registration in registrations {
        let target: EventTarget = match registration.target {
            ListenerTarget::Window => effects.window().clone().into(),
            ListenerTarget::Document => effects.document().clone().into(),
            ListenerTarget::Element(element) => element.into(),
        };

        let handler = handler.clone();
        let action = registration.action;
        let listener: Closure<dyn Fn(Event)> = Closure::new(move |event: Event| {
            let dispatch = handler(&action, &event_context(&event));
            if dispatch.prevent_default {
                event.prevent_default();
            }
        });
        target.add_event_listener_with_callback(
            registration.event.as_str(),
            listener.as_ref().unchecked_ref(),
        )?;
        listener.forget();
    }

    tracing::debug!("attached {} listeners", count);
    Ok(())
}

/// Run `boot` once the document is parsed.
pub fn on_ready(effects: &BrowserEffects, boot: impl FnOnce() + 'static) -> WebResult<()> {
    if effects.document().ready_state() != "loading" {
        boot();
        return Ok(());
    }
    let listener = Closure::once(boot);
    effects.document().add_event_listener_with_callback(
        EventKind::DomContentLoaded.as_str(),
        listener.as_ref().unchecked_ref(),
    )?;
    listener.forget();
    Ok(())
}

/// Log uncaught script errors. The page is left untouched.
pub fn report_uncaught_errors(effects: &BrowserEffects) -> WebResult<()> {
    let listener: Closure<dyn Fn(ErrorEvent)> = Closure::new(|event: ErrorEvent| {
        report_script_error(&event.message());
    });
    effects
        .window()
        .add_event_listener_with_callback("error", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}
