//! Site configuration
//!
//! Every tunable the page logic uses, with the production values as defaults.
//! The web crate reads an optional JSON object from the page; missing keys
//! keep their defaults.

use crate::error::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};

/// Scroll offset (px) past which the header gets its scrolled state.
pub const DEFAULT_HEADER_SCROLL_THRESHOLD: f64 = 100.0;
/// Scroll offset (px) past which the back-to-top button is shown.
pub const DEFAULT_BACK_TO_TOP_THRESHOLD: f64 = 300.0;
/// Extra gap (px) left above an anchor target after scrolling.
pub const DEFAULT_ANCHOR_GAP: f64 = 20.0;
/// Quiet period for the debounced header scroll handler.
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 10;

pub const DEFAULT_TOAST_SHOW_DELAY_MS: u64 = 100;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5_000;
pub const DEFAULT_TOAST_FADE_MS: u64 = 300;
pub const DEFAULT_SUCCESS_BANNER_MS: u64 = 5_000;

pub const DEFAULT_CONTACT_SEND_DELAY_MS: u64 = 1_000;
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1_000;
pub const DEFAULT_SIGNUP_DELAY_MS: u64 = 1_200;
pub const DEFAULT_FORGOT_DELAY_MS: u64 = 800;

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_MIN_NAME_LENGTH: usize = 2;
pub const DEFAULT_MIN_MESSAGE_LENGTH: usize = 10;

/// Tunables for navigation, scroll effects and form workflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub header_scroll_threshold: f64,
    pub back_to_top_threshold: f64,
    pub anchor_gap: f64,
    pub scroll_debounce_ms: u64,

    pub toast_show_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub toast_fade_ms: u64,
    pub success_banner_ms: u64,

    pub contact_send_delay_ms: u64,
    pub login_delay_ms: u64,
    pub signup_delay_ms: u64,
    pub forgot_delay_ms: u64,

    /// Fraction of a section that must be visible before it fades in.
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub min_password_length: usize,
    pub min_name_length: usize,
    pub min_message_length: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold: DEFAULT_HEADER_SCROLL_THRESHOLD,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
            anchor_gap: DEFAULT_ANCHOR_GAP,
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            toast_show_delay_ms: DEFAULT_TOAST_SHOW_DELAY_MS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            toast_fade_ms: DEFAULT_TOAST_FADE_MS,
            success_banner_ms: DEFAULT_SUCCESS_BANNER_MS,
            contact_send_delay_ms: DEFAULT_CONTACT_SEND_DELAY_MS,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            signup_delay_ms: DEFAULT_SIGNUP_DELAY_MS,
            forgot_delay_ms: DEFAULT_FORGOT_DELAY_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_string(),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            min_name_length: DEFAULT_MIN_NAME_LENGTH,
            min_message_length: DEFAULT_MIN_MESSAGE_LENGTH,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a configuration object.
    ///
    /// Keys are camelCase; anything omitted keeps its default.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration object, keeping the defaults if it is malformed
    /// or out of range. A bad inline config must not stop the page from wiring.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(target: "senior::config", "ignoring site config: {}", err);
                Self::default()
            }
        }
    }

    /// Check that every value is in range.
    ///
    /// # Validation Rules
    /// - Scroll thresholds and the anchor gap must be finite and non-negative
    /// - `reveal_threshold` must lie within `[0, 1]`
    /// - `toast_duration_ms` must be greater than 0
    pub fn validate(&self) -> SiteResult<()> {
        let offsets = [
            ("headerScrollThreshold", self.header_scroll_threshold),
            ("backToTopThreshold", self.back_to_top_threshold),
            ("anchorGap", self.anchor_gap),
        ];
        for (key, value) in offsets {
            if !value.is_finite() || value < 0.0 {
                return Err(SiteError::config(format!(
                    "{key} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(SiteError::config(format!(
                "revealThreshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }

        if self.toast_duration_ms == 0 {
            return Err(SiteError::config("toastDurationMs must be greater than 0"));
        }

        Ok(())
    }
}
