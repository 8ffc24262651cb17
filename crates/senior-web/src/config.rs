//! Configuration loading
//!
//! Precedence: a value passed to `configure`, then a JSON object in a
//! `<script id="site-config" type="application/json">` element, then the
//! defaults. A malformed inline object is logged and replaced by the defaults.

use crate::dom::BrowserEffects;
use crate::error::WebResult;
use senior_core::effects::PageEffects;
use senior_core::SiteConfig;
use std::cell::RefCell;
use std::rc::Rc;

/// Id of the optional inline configuration element.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

thread_local! {
    static OVERRIDE: RefCell<Option<Rc<SiteConfig>>> = const { RefCell::new(None) };
}

/// Replace the configuration used by everything wired afterwards.
pub fn set_override(config: SiteConfig) -> WebResult<()> {
    config.validate()?;
    OVERRIDE.with(|slot| *slot.borrow_mut() = Some(Rc::new(config)));
    Ok(())
}

/// The configuration in effect.
pub fn load(effects: &BrowserEffects) -> Rc<SiteConfig> {
    if let Some(config) = OVERRIDE.with(|slot| slot.borrow().clone()) {
        return config;
    }

    let Some(element) = effects.element_by_id(CONFIG_ELEMENT_ID) else {
        return Rc::new(SiteConfig::default());
    };
    let config = SiteConfig::from_json_or_default(&effects.text(&element));
    tracing::debug!("loaded configuration from #{}", CONFIG_ELEMENT_ID);
    Rc::new(config)
}
