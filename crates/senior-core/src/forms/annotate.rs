//! Inline field annotation
//!
//! Applies a [`FieldVerdict`] to the page: error class, `aria-invalid`, and at
//! most one `.form-message` node in the control's parent.

use super::validation::FieldVerdict;
use crate::effects::PageEffects;
use crate::error::SiteResult;

pub const FIELD_ERROR_CLASS: &str = "error";
pub const FIELD_MESSAGE_CLASS: &str = "form-message";

/// Writes validation state onto form controls.
#[derive(Debug, Clone)]
pub struct FieldAnnotator<P> {
    page: P,
}

impl<P: PageEffects> FieldAnnotator<P> {
    pub fn new(page: P) -> Self {
        Self { page }
    }

    /// Annotate `input` with `verdict`.
    pub fn apply(&self, input: &P::Element, verdict: &FieldVerdict) -> SiteResult<()> {
        match verdict {
            FieldVerdict::Valid => self.clear(input),
            FieldVerdict::Invalid { message } => self.show(input, message),
        }
    }

    /// Mark `input` invalid and show `message` beside it.
    pub fn show(&self, input: &P::Element, message: &str) -> SiteResult<()> {
        self.page.add_class(input, FIELD_ERROR_CLASS)?;
        self.page.set_attribute(input, "aria-invalid", "true")?;

        let Some(container) = self.page.parent(input) else {
            return Ok(());
        };
        self.remove_message(&container);

        let node = self.page.create_element("div")?;
        self.page.set_attribute(
            &node,
            "class",
            &format!("{FIELD_MESSAGE_CLASS} {FIELD_ERROR_CLASS}"),
        )?;
        self.page.set_attribute(&node, "role", "alert")?;
        self.page.set_attribute(&node, "aria-live", "polite")?;
        self.page.set_text(&node, message);
        self.page.append_child(&container, &node)
    }

    /// Clear any error state from `input`.
    pub fn clear(&self, input: &P::Element) -> SiteResult<()> {
        self.page.remove_class(input, FIELD_ERROR_CLASS)?;
        self.page.set_attribute(input, "aria-invalid", "false")?;
        if let Some(container) = self.page.parent(input) {
            self.remove_message(&container);
        }
        Ok(())
    }

    /// The message currently shown for `input`, if any.
    pub fn message_for(&self, input: &P::Element) -> Option<String> {
        let container = self.page.parent(input)?;
        self.page
            .descendants_with_class(&container, FIELD_MESSAGE_CLASS)
            .first()
            .map(|node| self.page.text(node))
    }

    fn remove_message(&self, container: &P::Element) {
        if let Some(existing) = self
            .page
            .descendants_with_class(container, FIELD_MESSAGE_CLASS)
            .first()
        {
            self.page.remove(existing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{MemoryPage, NodeId};

    fn fixture() -> (MemoryPage, NodeId, NodeId) {
        let page = MemoryPage::new();
        let group = page.insert(page.body_id(), "div", None);
        let input = page.insert_input(group, "email", "email");
        (page, group, input)
    }

    #[test]
    fn test_invalid_marks_input_and_adds_one_message() {
        let (page, group, input) = fixture();
        let annotator = FieldAnnotator::new(page.clone());

        annotator.show(&input, "first").unwrap();
        annotator.show(&input, "second").unwrap();

        assert!(page.has_class(&input, FIELD_ERROR_CLASS));
        assert_eq!(page.attribute(&input, "aria-invalid").as_deref(), Some("true"));
        let messages = page.descendants_with_class(&group, FIELD_MESSAGE_CLASS);
        assert_eq!(messages.len(), 1);
        assert_eq!(page.text(&messages[0]), "second");
        assert_eq!(page.attribute(&messages[0], "role").as_deref(), Some("alert"));
        assert_eq!(page.attribute(&messages[0], "aria-live").as_deref(), Some("polite"));
        assert_eq!(annotator.message_for(&input).as_deref(), Some("second"));
    }

    #[test]
    fn test_valid_clears_annotation() {
        let (page, group, input) = fixture();
        let annotator = FieldAnnotator::new(page.clone());

        annotator.apply(&input, &FieldVerdict::invalid("bad")).unwrap();
        annotator.apply(&input, &FieldVerdict::Valid).unwrap();

        assert!(!page.has_class(&input, FIELD_ERROR_CLASS));
        assert_eq!(page.attribute(&input, "aria-invalid").as_deref(), Some("false"));
        assert!(page.descendants_with_class(&group, FIELD_MESSAGE_CLASS).is_empty());
        assert_eq!(annotator.message_for(&input), None);
    }
}
