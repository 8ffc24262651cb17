//! Scroll-position rules
//!
//! Pure functions over offsets; the controller reads the page and applies the
//! results.

use crate::config::SiteConfig;

/// Whether the header shows its scrolled state at `scroll_y`.
pub fn header_is_scrolled(scroll_y: f64, config: &SiteConfig) -> bool {
    scroll_y > config.header_scroll_threshold
}

/// Whether the back-to-top button is visible at `scroll_y`.
pub fn back_to_top_visible(scroll_y: f64, config: &SiteConfig) -> bool {
    scroll_y > config.back_to_top_threshold
}

/// Scroll offset that leaves an anchor target just below the fixed header.
pub fn anchor_target(offset_top: f64, header_height: f64, config: &SiteConfig) -> f64 {
    offset_top - header_height - config.anchor_gap
}

/// The element id an in-page link points at.
///
/// Returns `None` for anything that is not a `#fragment` link.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_strict() {
        let config = SiteConfig::default();
        assert!(!header_is_scrolled(100.0, &config));
        assert!(header_is_scrolled(100.5, &config));
        assert!(!back_to_top_visible(300.0, &config));
        assert!(back_to_top_visible(301.0, &config));
    }

    #[test]
    fn test_anchor_target_subtracts_header_and_gap() {
        let config = SiteConfig::default();
        assert_eq!(anchor_target(1_000.0, 80.0, &config), 900.0);
        assert_eq!(anchor_target(50.0, 0.0, &config), 30.0);
    }

    #[test]
    fn test_fragment() {
        assert_eq!(fragment("#servicos"), Some("servicos"));
        assert_eq!(fragment("#"), Some(""));
        assert_eq!(fragment("/login.html"), None);
        assert_eq!(fragment("https://example.com/#top"), None);
    }
}
