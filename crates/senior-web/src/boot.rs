//! Page start-up
//!
//! Builds every controller the current page supports and attaches its
//! listeners. The landing page gets navigation and the contact form; auth
//! pages get the form their path selects.

use crate::bindings::{form_bindings, page_bindings};
use crate::config;
use crate::dom::BrowserEffects;
use crate::error::WebResult;
use crate::listeners::attach;
use crate::logging::is_development;
use crate::observer::observe_sections;
use senior_core::bindings::ids;
use senior_core::forms::SubmissionTransport;
use senior_core::{
    AuthForm, AuthFormKind, ContactForm, NavController, SimulatedTransport, SiteConfig,
};
use std::rc::Rc;

/// Names of the exported `SeniorExpert` operations.
pub const SENIOR_EXPERT_EXPORTS: [&str; 6] = [
    "toggleMobileMenu",
    "closeMobileMenu",
    "smoothScrollTo",
    "scrollToTop",
    "validateForm",
    "sendForm",
];

/// Wire the whole page.
pub fn boot() -> WebResult<()> {
    let effects = BrowserEffects::new()?;
    let config = config::load(&effects);

    init_navigation(&effects, &config)?;
    init_contact(&effects, &config)?;

    let path = effects.pathname();
    if let Some(kind) = AuthFormKind::from_path(&path) {
        init_auth(&effects, &config, kind)?;
    }
    tracing::info!("Auth system initialized for: {}", path);

    if is_development(&effects.hostname()) {
        tracing::info!("Modo de desenvolvimento ativo");
        tracing::info!("Funções disponíveis: {:?}", SENIOR_EXPERT_EXPORTS);
    }
    Ok(())
}

pub fn init_navigation(
    effects: &BrowserEffects,
    config: &Rc<SiteConfig>,
) -> WebResult<Rc<NavController<BrowserEffects>>> {
    let nav = Rc::new(NavController::new(
        effects.clone(),
        config.clone(),
        page_bindings(effects),
    ));

    let controller = nav.clone();
    attach(effects, nav.registrations(), move |action, event| {
        controller.dispatch(action, event)
    })?;

    nav.init()?;
    if let Err(err) = observe_sections(&nav) {
        tracing::warn!("section reveal unavailable: {}", err);
    }
    Ok(nav)
}

fn transport(effects: &BrowserEffects, config: &Rc<SiteConfig>) -> Rc<dyn SubmissionTransport> {
    Rc::new(SimulatedTransport::new(effects.clone(), config.clone()))
}

pub fn init_contact(effects: &BrowserEffects, config: &Rc<SiteConfig>) -> WebResult<()> {
    let Some(bindings) = form_bindings(effects, ids::CONTACT_FORM) else {
        return Ok(());
    };
    let form = Rc::new(ContactForm::new(
        effects.clone(),
        config.clone(),
        bindings,
        transport(effects, config),
    ));

    let controller = form.clone();
    attach(effects, form.registrations(), move |action, _| {
        controller.dispatch(*action)
    })
}

/// Wire the auth form of `kind`. Pages without that form are left alone.
pub fn init_auth(
    effects: &BrowserEffects,
    config: &Rc<SiteConfig>,
    kind: AuthFormKind,
) -> WebResult<bool> {
    let Some(bindings) = form_bindings(effects, kind.form_id()) else {
        return Ok(false);
    };
    let form = Rc::new(AuthForm::new(
        kind,
        effects.clone(),
        config.clone(),
        bindings,
        transport(effects, config),
    ));

    let controller = form.clone();
    attach(effects, form.registrations(), move |action, _| {
        controller.dispatch(*action)
    })?;
    tracing::debug!("{} form wired", kind);
    Ok(true)
}
