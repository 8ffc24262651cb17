//! Effect traits
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `senior-web` (browser), [`memory`] / [`simulated`] (tests)
//! - **Usage**: every controller and workflow in this crate
//!
//! - `PageEffects`: element lookup, class and attribute mutation, node
//!   creation and removal, scroll position
//! - `TimeEffects`: timers standing in for network latency and UI delays
//! - `SpawnEffects`: fire-and-forget local tasks (toast expiry, debounced handlers)
//!
//! All handlers are single-threaded; futures are not `Send`.

pub mod memory;
pub mod mock;
pub mod simulated;

use crate::error::SiteResult;
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::fmt;

pub use memory::{MemoryPage, NodeId};
pub use mock::MockEffects;
pub use simulated::{LocalTaskQueue, SimulatedTime};

/// How a programmatic scroll should move the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scrolling
    Smooth,
    /// Jump immediately
    Instant,
}

/// Pure trait for page (DOM) operations.
///
/// Element handles are opaque and cheap to clone. Operations on detached
/// handles are no-ops rather than errors.
pub trait PageEffects {
    /// Handle to a page element.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    // Lookup and structure

    /// Find an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// The document body.
    fn body(&self) -> SiteResult<Self::Element>;

    /// Parent element, if attached.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    /// Lower-case tag name.
    fn tag_name(&self, element: &Self::Element) -> String;

    /// Descendants of `root` carrying `class`, in document order.
    fn descendants_with_class(&self, root: &Self::Element, class: &str) -> Vec<Self::Element>;

    // Classes and attributes

    fn add_class(&self, element: &Self::Element, class: &str) -> SiteResult<()>;
    fn remove_class(&self, element: &Self::Element, class: &str) -> SiteResult<()>;

    /// Toggle `class`, returning whether it is now present.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> SiteResult<bool>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> SiteResult<()>;

    // Form controls

    /// Current value of an input, textarea or select; empty otherwise.
    fn value(&self, element: &Self::Element) -> String;

    /// Checked state of a checkbox or radio; `false` otherwise.
    fn is_checked(&self, element: &Self::Element) -> bool;

    fn set_disabled(&self, element: &Self::Element, disabled: bool) -> SiteResult<()>;
    fn is_disabled(&self, element: &Self::Element) -> bool;

    /// Restore every control of a form to its initial value.
    fn reset_form(&self, form: &Self::Element) -> SiteResult<()>;

    // Text and nodes

    fn text(&self, element: &Self::Element) -> String;
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> SiteResult<Self::Element>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> SiteResult<()>;

    /// Detach an element from the page.
    fn remove(&self, element: &Self::Element);

    // Scrolling and geometry

    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// Whether the page honours smooth scrolling.
    fn supports_smooth_scroll(&self) -> bool;

    /// Distance from the top of the document to the element.
    fn offset_top(&self, element: &Self::Element) -> f64;

    fn offset_height(&self, element: &Self::Element) -> f64;
}

/// Timer operations.
#[async_trait(?Send)]
pub trait TimeEffects {
    /// Resolve after `ms` milliseconds.
    async fn sleep_ms(&self, ms: u64);
}

/// Local task spawning.
pub trait SpawnEffects {
    /// Run `task` to completion in the background on the current thread.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Everything a controller needs, bundled as one cloneable handle.
pub trait SiteEffects: PageEffects + TimeEffects + SpawnEffects + Clone + 'static {}

impl<T> SiteEffects for T where T: PageEffects + TimeEffects + SpawnEffects + Clone + 'static {}
