//! Honeypot bot filter
//!
//! A hidden input real visitors never fill. Any non-blank value marks the
//! submission as automated.

use crate::effects::PageEffects;

/// `name` of the hidden honeypot input.
pub const HONEYPOT_FIELD: &str = "website";

/// Toast shown when a bot is detected.
pub const BOT_REJECTED_MESSAGE: &str = "Acesso negado";

/// Whether a honeypot value marks the submission as a bot.
pub fn is_bot_value(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check the honeypot control, if the form has one.
pub fn is_bot<P: PageEffects + ?Sized>(page: &P, honeypot: Option<&P::Element>) -> bool {
    honeypot.is_some_and(|field| is_bot_value(&page.value(field)))
}
