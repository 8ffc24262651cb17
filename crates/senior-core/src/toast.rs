//! # Toasts
//!
//! Transient notifications appended to the body. Only one toast node exists at
//! a time: showing a new one removes the previous node first.
//!
//! Lifecycle of a shown toast:
//! 1. created with classes `toast <level>`
//! 2. `show` added after `toast_show_delay_ms`
//! 3. `show` removed after `toast_duration_ms`
//! 4. node removed after `toast_fade_ms`

use crate::config::SiteConfig;
use crate::effects::SiteEffects;
use crate::error::SiteResult;
use std::fmt;
use std::rc::Rc;

/// Class shared by every toast node.
pub const TOAST_CLASS: &str = "toast";
/// Class that makes a toast visible.
pub const TOAST_SHOW_CLASS: &str = "show";

/// Toast severity level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastLevel {
    /// CSS modifier class for this level.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// A toast message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }
}

/// Single-slot toast presenter.
#[derive(Debug, Clone)]
pub struct ToastLayer<E: SiteEffects> {
    effects: E,
    config: Rc<SiteConfig>,
}

impl<E: SiteEffects> ToastLayer<E> {
    pub fn new(effects: E, config: Rc<SiteConfig>) -> Self {
        Self { effects, config }
    }

    /// Replace any visible toast with `toast` and schedule its expiry.
    pub fn show(&self, toast: &Toast) -> SiteResult<E::Element> {
        let body = self.effects.body()?;
        for existing in self.effects.descendants_with_class(&body, TOAST_CLASS) {
            self.effects.remove(&existing);
        }

        let node = self.effects.create_element("div")?;
        self.effects.set_attribute(
            &node,
            "class",
            &format!("{TOAST_CLASS} {}", toast.level.class()),
        )?;
        self.effects.set_text(&node, &toast.message);
        self.effects.append_child(&body, &node)?;
        tracing::debug!(level = %toast.level, "toast: {}", toast.message);

        let effects = self.effects.clone();
        let config = self.config.clone();
        let handle = node.clone();
        self.effects.spawn_local(Box::pin(async move {
            run_lifecycle(&effects, &config, &handle).await;
        }));

        Ok(node)
    }
}

async fn run_lifecycle<E: SiteEffects>(effects: &E, config: &SiteConfig, node: &E::Element) {
    effects.sleep_ms(config.toast_show_delay_ms).await;
    if let Err(err) = effects.add_class(node, TOAST_SHOW_CLASS) {
        tracing::debug!("toast show failed: {}", err);
    }

    effects.sleep_ms(config.toast_duration_ms).await;
    if let Err(err) = effects.remove_class(node, TOAST_SHOW_CLASS) {
        tracing::debug!("toast hide failed: {}", err);
    }

    effects.sleep_ms(config.toast_fade_ms).await;
    effects.remove(node);
}
