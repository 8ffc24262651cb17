//! In-memory page handler
//!
//! A small document tree with just enough behaviour for the controllers:
//! ids, classes, attributes, control values, text, scroll position and
//! element geometry. Cloning shares the same document.

use super::{PageEffects, ScrollBehavior};
use crate::error::{SiteError, SiteResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Handle to a node in a [`MemoryPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    value: String,
    default_value: String,
    checked: bool,
    default_checked: bool,
    disabled: bool,
    offset_top: f64,
    offset_height: f64,
}

#[derive(Debug)]
struct Document {
    nodes: Vec<Node>,
    scroll_y: f64,
    smooth_scroll: bool,
    has_body: bool,
    scrolls: Vec<(f64, ScrollBehavior)>,
}

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl Document {
    fn new() -> Self {
        let root = Node {
            tag: "html".to_string(),
            children: vec![BODY],
            ..Node::default()
        };
        let body = Node {
            tag: "body".to_string(),
            parent: Some(ROOT),
            ..Node::default()
        };
        Self {
            nodes: vec![root, body],
            scroll_y: 0.0,
            smooth_scroll: true,
            has_body: true,
            scrolls: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ROOT {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
        self.node_mut(id).parent = None;
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }
}

/// In-memory document implementing [`PageEffects`].
#[derive(Debug, Clone)]
pub struct MemoryPage {
    doc: Rc<RefCell<Document>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create an empty document with a `<body>`.
    pub fn new() -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document::new())),
        }
    }

    /// The body handle.
    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Append a new element under `parent`, optionally with an `id`.
    pub fn insert(&self, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let node_id = NodeId(doc.nodes.len());
        let mut node = Node {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..Node::default()
        };
        if let Some(id) = id {
            node.attrs.insert("id".to_string(), id.to_string());
        }
        doc.nodes.push(node);
        doc.node_mut(parent).children.push(node_id);
        node_id
    }

    /// Append a form control with a `name`, as the page would render it.
    pub fn insert_input(&self, parent: NodeId, name: &str, input_type: &str) -> NodeId {
        let tag = if input_type == "textarea" { "textarea" } else { "input" };
        let node = self.insert(parent, tag, None);
        let mut doc = self.doc.borrow_mut();
        let attrs = &mut doc.node_mut(node).attrs;
        attrs.insert("name".to_string(), name.to_string());
        if tag == "input" {
            attrs.insert("type".to_string(), input_type.to_string());
        }
        node
    }

    /// Add a class while building a fixture.
    pub fn with_class(&self, node: NodeId, class: &str) -> NodeId {
        let _ = PageEffects::add_class(self, &node, class);
        node
    }

    /// Set an attribute while building a fixture.
    pub fn with_attr(&self, node: NodeId, name: &str, value: &str) -> NodeId {
        let _ = PageEffects::set_attribute(self, &node, name, value);
        node
    }

    /// Simulate the user typing into a control.
    pub fn type_value(&self, node: NodeId, value: &str) {
        self.doc.borrow_mut().node_mut(node).value = value.to_string();
    }

    /// Set the value the control resets to.
    pub fn set_default_value(&self, node: NodeId, value: &str) {
        let mut doc = self.doc.borrow_mut();
        let entry = doc.node_mut(node);
        entry.default_value = value.to_string();
        entry.value = value.to_string();
    }

    /// Simulate the user toggling a checkbox.
    pub fn set_checked(&self, node: NodeId, checked: bool) {
        self.doc.borrow_mut().node_mut(node).checked = checked;
    }

    /// Set layout geometry for an element.
    pub fn set_geometry(&self, node: NodeId, offset_top: f64, offset_height: f64) {
        let mut doc = self.doc.borrow_mut();
        let entry = doc.node_mut(node);
        entry.offset_top = offset_top;
        entry.offset_height = offset_height;
    }

    /// Move the viewport as if the user scrolled.
    pub fn set_scroll_y(&self, y: f64) {
        self.doc.borrow_mut().scroll_y = y;
    }

    /// Make `body()` fail, as on a document that has not parsed its body.
    pub fn hide_body(&self) {
        self.doc.borrow_mut().has_body = false;
    }

    /// Toggle whether smooth scrolling is reported as supported.
    pub fn set_smooth_scroll_supported(&self, supported: bool) {
        self.doc.borrow_mut().smooth_scroll = supported;
    }

    /// Every programmatic scroll performed so far.
    pub fn scroll_history(&self) -> Vec<(f64, ScrollBehavior)> {
        self.doc.borrow().scrolls.clone()
    }

    /// Whether the node is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.doc.borrow().is_attached(node)
    }

    /// Classes of a node, in insertion order.
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.doc.borrow().node(node).classes.clone()
    }

    /// Attached elements carrying `class` anywhere in the document.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants_with_class(&ROOT, class)
    }

    fn class_list_mut<R>(&self, node: NodeId, f: impl FnOnce(&mut Vec<String>) -> R) -> R {
        let mut doc = self.doc.borrow_mut();
        f(&mut doc.node_mut(node).classes)
    }
}

impl PageEffects for MemoryPage {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        doc.descendants(ROOT)
            .into_iter()
            .find(|node| doc.node(*node).attrs.get("id").map(String::as_str) == Some(id))
    }

    fn body(&self) -> SiteResult<NodeId> {
        if self.doc.borrow().has_body {
            Ok(BODY)
        } else {
            Err(SiteError::MissingElement("body".to_string()))
        }
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.doc.borrow().node(*element).parent
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let doc = self.doc.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = doc.node(id).parent;
        }
        false
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.doc.borrow().node(*element).tag.clone()
    }

    fn descendants_with_class(&self, root: &NodeId, class: &str) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        doc.descendants(*root)
            .into_iter()
            .filter(|node| doc.node(*node).classes.iter().any(|c| c == class))
            .collect()
    }

    fn add_class(&self, element: &NodeId, class: &str) -> SiteResult<()> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(SiteError::page(format!("invalid class token {class:?}")));
        }
        self.class_list_mut(*element, |classes| {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        });
        Ok(())
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> SiteResult<()> {
        self.class_list_mut(*element, |classes| classes.retain(|c| c != class));
        Ok(())
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> SiteResult<bool> {
        Ok(self.class_list_mut(*element, |classes| {
            if classes.iter().any(|c| c == class) {
                classes.retain(|c| c != class);
                false
            } else {
                classes.push(class.to_string());
                true
            }
        }))
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .node(*element)
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let doc = self.doc.borrow();
        let node = doc.node(*element);
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> SiteResult<()> {
        if name == "class" {
            self.class_list_mut(*element, |classes| {
                *classes = value.split_whitespace().map(str::to_string).collect();
            });
            return Ok(());
        }
        self.doc
            .borrow_mut()
            .node_mut(*element)
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn value(&self, element: &NodeId) -> String {
        self.doc.borrow().node(*element).value.clone()
    }

    fn is_checked(&self, element: &NodeId) -> bool {
        self.doc.borrow().node(*element).checked
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) -> SiteResult<()> {
        self.doc.borrow_mut().node_mut(*element).disabled = disabled;
        Ok(())
    }

    fn is_disabled(&self, element: &NodeId) -> bool {
        self.doc.borrow().node(*element).disabled
    }

    fn reset_form(&self, form: &NodeId) -> SiteResult<()> {
        let mut doc = self.doc.borrow_mut();
        if doc.node(*form).tag != "form" {
            return Err(SiteError::page("reset target is not a form"));
        }
        for id in doc.descendants(*form) {
            let node = doc.node_mut(id);
            node.value = node.default_value.clone();
            node.checked = node.default_checked;
        }
        Ok(())
    }

    fn text(&self, element: &NodeId) -> String {
        self.doc.borrow().node(*element).text.clone()
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.doc.borrow_mut().node_mut(*element).text = text.to_string();
    }

    fn create_element(&self, tag: &str) -> SiteResult<NodeId> {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> SiteResult<()> {
        let mut doc = self.doc.borrow_mut();
        if self_or_ancestor(&doc, *child, *parent) {
            return Err(SiteError::page("cannot append a node into itself"));
        }
        doc.detach(*child);
        doc.node_mut(*child).parent = Some(*parent);
        doc.node_mut(*parent).children.push(*child);
        Ok(())
    }

    fn remove(&self, element: &NodeId) {
        self.doc.borrow_mut().detach(*element);
    }

    fn scroll_y(&self) -> f64 {
        self.doc.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut doc = self.doc.borrow_mut();
        doc.scroll_y = top.max(0.0);
        doc.scrolls.push((top, behavior));
    }

    fn supports_smooth_scroll(&self) -> bool {
        self.doc.borrow().smooth_scroll
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.doc.borrow().node(*element).offset_top
    }

    fn offset_height(&self, element: &NodeId) -> f64 {
        self.doc.borrow().node(*element).offset_height
    }
}

fn self_or_ancestor(doc: &Document, candidate: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == candidate {
            return true;
        }
        current = doc.node(id).parent;
    }
    false
}
