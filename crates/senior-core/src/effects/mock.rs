//! Composite mock handler
//!
//! Bundles [`MemoryPage`], [`SimulatedTime`] and [`LocalTaskQueue`] into one
//! [`SiteEffects`](super::SiteEffects) value for controller tests.

use super::{
    LocalTaskQueue, MemoryPage, NodeId, PageEffects, ScrollBehavior, SimulatedTime, SpawnEffects,
    TimeEffects,
};
use crate::error::SiteResult;
use async_trait::async_trait;
use futures::future::LocalBoxFuture;

/// Deterministic effects for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEffects {
    pub page: MemoryPage,
    pub time: SimulatedTime,
    pub tasks: LocalTaskQueue,
}

impl MockEffects {
    /// Create mock effects over an empty page.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageEffects for MockEffects {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.page.element_by_id(id)
    }

    fn body(&self) -> SiteResult<NodeId> {
        self.page.body()
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.page.parent(element)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.page.contains(ancestor, node)
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.page.tag_name(element)
    }

    fn descendants_with_class(&self, root: &NodeId, class: &str) -> Vec<NodeId> {
        self.page.descendants_with_class(root, class)
    }

    fn add_class(&self, element: &NodeId, class: &str) -> SiteResult<()> {
        self.page.add_class(element, class)
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> SiteResult<()> {
        self.page.remove_class(element, class)
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> SiteResult<bool> {
        self.page.toggle_class(element, class)
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.page.has_class(element, class)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.page.attribute(element, name)
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> SiteResult<()> {
        self.page.set_attribute(element, name, value)
    }

    fn value(&self, element: &NodeId) -> String {
        self.page.value(element)
    }

    fn is_checked(&self, element: &NodeId) -> bool {
        self.page.is_checked(element)
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) -> SiteResult<()> {
        self.page.set_disabled(element, disabled)
    }

    fn is_disabled(&self, element: &NodeId) -> bool {
        self.page.is_disabled(element)
    }

    fn reset_form(&self, form: &NodeId) -> SiteResult<()> {
        self.page.reset_form(form)
    }

    fn text(&self, element: &NodeId) -> String {
        self.page.text(element)
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.page.set_text(element, text);
    }

    fn create_element(&self, tag: &str) -> SiteResult<NodeId> {
        self.page.create_element(tag)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> SiteResult<()> {
        self.page.append_child(parent, child)
    }

    fn remove(&self, element: &NodeId) {
        self.page.remove(element);
    }

    fn scroll_y(&self) -> f64 {
        self.page.scroll_y()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.page.scroll_to(top, behavior);
    }

    fn supports_smooth_scroll(&self) -> bool {
        self.page.supports_smooth_scroll()
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.page.offset_top(element)
    }

    fn offset_height(&self, element: &NodeId) -> f64 {
        self.page.offset_height(element)
    }
}

#[async_trait(?Send)]
impl TimeEffects for MockEffects {
    async fn sleep_ms(&self, ms: u64) {
        self.time.sleep_ms(ms).await;
    }
}

impl SpawnEffects for MockEffects {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.spawn_local(task);
    }
}
