//! Navigation and scroll effects
//!
//! - [`controller`]: the [`NavController`] and its listener wiring
//! - [`scroll`]: threshold and anchor-offset rules
//! - [`reveal`]: one-shot fade-in tracking for sections

pub mod controller;
pub mod reveal;
pub mod scroll;

pub use controller::{NavAction, NavController};
pub use reveal::{RevealStep, RevealTracker};
pub use scroll::{anchor_target, back_to_top_visible, fragment, header_is_scrolled};
