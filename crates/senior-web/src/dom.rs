//! Browser effect handlers
//!
//! Implements the `senior-core` effect traits over `web-sys`. Timers use
//! `gloo-timers`; spawned tasks run on the `wasm-bindgen-futures` executor.

use crate::error::{js_error, WebError, WebResult};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use senior_core::effects::{PageEffects, ScrollBehavior, SpawnEffects, TimeEffects};
use senior_core::{SiteError, SiteResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollToOptions, Window,
};

/// Effects backed by the live page.
#[derive(Clone, Debug)]
pub struct BrowserEffects {
    window: Window,
    document: Document,
}

impl BrowserEffects {
    pub fn new() -> WebResult<Self> {
        let window = web_sys::window().ok_or_else(|| WebError::missing("window"))?;
        let document = window
            .document()
            .ok_or_else(|| WebError::missing("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Elements under `root` (or the document) matching `selector`.
    pub fn select_all(&self, root: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match root {
            Some(root) => root.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = list else {
            tracing::debug!("invalid selector: {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// First element under `root` matching `selector`.
    pub fn select(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    /// `location.pathname`, or empty when unavailable.
    pub fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    pub fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }
}

impl PageEffects for BrowserEffects {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> SiteResult<Element> {
        self.document
            .body()
            .map(Element::from)
            .ok_or_else(|| SiteError::MissingElement("body".to_string()))
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name().to_ascii_lowercase()
    }

    fn descendants_with_class(&self, root: &Element, class: &str) -> Vec<Element> {
        self.select_all(Some(root), &format!(".{class}"))
    }

    fn add_class(&self, element: &Element, class: &str) -> SiteResult<()> {
        element.class_list().add_1(class).map_err(js_error)
    }

    fn remove_class(&self, element: &Element, class: &str) -> SiteResult<()> {
        element.class_list().remove_1(class).map_err(js_error)
    }

    fn toggle_class(&self, element: &Element, class: &str) -> SiteResult<bool> {
        element.class_list().toggle(class).map_err(js_error)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> SiteResult<()> {
        element.set_attribute(name, value).map_err(js_error)
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn is_checked(&self, element: &Element) -> bool {
        element
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn set_disabled(&self, element: &Element, disabled: bool) -> SiteResult<()> {
        if disabled {
            element.set_attribute("disabled", "").map_err(js_error)
        } else {
            element.remove_attribute("disabled").map_err(js_error)
        }
    }

    fn is_disabled(&self, element: &Element) -> bool {
        element.has_attribute("disabled")
    }

    fn reset_form(&self, form: &Element) -> SiteResult<()> {
        let form = form
            .dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| SiteError::page("reset target is not a form"))?;
        form.reset();
        Ok(())
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn create_element(&self, tag: &str) -> SiteResult<Element> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> SiteResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Smooth => {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(web_sys::ScrollBehavior::Smooth);
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            ScrollBehavior::Instant => self.window.scroll_to_with_x_and_y(0.0, top),
        }
    }

    fn supports_smooth_scroll(&self) -> bool {
        self.document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .is_some_and(|root| {
                js_sys::Reflect::has(&root.style().into(), &JsValue::from_str("scrollBehavior"))
                    .unwrap_or(false)
            })
    }

    fn offset_top(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }
}

#[async_trait(?Send)]
impl TimeEffects for BrowserEffects {
    async fn sleep_ms(&self, ms: u64) {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

impl SpawnEffects for BrowserEffects {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
