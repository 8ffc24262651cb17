//! Element resolution
//!
//! Looks every handle up once at start-up and packs it into the binding
//! structs the controllers are built from.

use crate::dom::BrowserEffects;
use senior_core::bindings::{ids, selectors};
use senior_core::effects::PageEffects;
use senior_core::forms::honeypot::HONEYPOT_FIELD;
use senior_core::{FieldBinding, FormBindings, PageBindings};
use web_sys::Element;

/// Handles for the landing page. Missing elements stay `None`.
pub fn page_bindings(effects: &BrowserEffects) -> PageBindings<Element> {
    let bindings = PageBindings {
        header: effects.element_by_id(ids::HEADER),
        nav_menu: effects.element_by_id(ids::NAV_MENU),
        nav_toggle: effects.element_by_id(ids::NAV_TOGGLE),
        nav_close: effects.element_by_id(ids::NAV_CLOSE),
        nav_links: effects.select_all(None, selectors::NAV_LINKS),
        hero_buttons: effects.select_all(None, selectors::HERO_BUTTONS),
        back_to_top: effects.element_by_id(ids::BACK_TO_TOP),
        sections: effects.select_all(None, selectors::SECTIONS),
    };

    for (id, found) in [
        (ids::HEADER, bindings.header.is_some()),
        (ids::NAV_MENU, bindings.nav_menu.is_some()),
        (ids::NAV_TOGGLE, bindings.nav_toggle.is_some()),
        (ids::NAV_CLOSE, bindings.nav_close.is_some()),
        (ids::BACK_TO_TOP, bindings.back_to_top.is_some()),
    ] {
        if !found {
            tracing::debug!("#{} not on this page, wiring skipped", id);
        }
    }
    bindings
}

/// Handles for the form with `form_id`, if the page renders it.
///
/// Every named control except the honeypot becomes a field; `required`
/// reflects the control's attribute.
pub fn form_bindings(effects: &BrowserEffects, form_id: &str) -> Option<FormBindings<Element>> {
    let Some(form) = effects.element_by_id(form_id) else {
        tracing::debug!("#{} not on this page", form_id);
        return None;
    };

    let mut bindings = FormBindings::new(form.clone());
    if let Some(submit) = effects.select(&form, selectors::SUBMIT_BUTTON) {
        bindings = bindings.with_submit(submit);
    }
    if let Some(honeypot) = effects.select(&form, selectors::HONEYPOT) {
        bindings = bindings.with_honeypot(honeypot);
    }

    for control in effects.select_all(Some(&form), selectors::NAMED_CONTROLS) {
        let Some(name) = control.get_attribute("name") else {
            continue;
        };
        if name == HONEYPOT_FIELD {
            continue;
        }
        let required = control
            .matches(selectors::REQUIRED_INPUTS)
            .unwrap_or(false);
        bindings = bindings.with_field(FieldBinding::new(name, control, required));
    }

    Some(bindings)
}
