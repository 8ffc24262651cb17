//! Listener registration lists
//!
//! Controllers describe their wiring as a list of [`Registration`]s instead of
//! attaching listeners themselves. The web crate turns each entry into a DOM
//! listener that calls back into the controller's `dispatch`; tests read the
//! list directly and dispatch actions by hand.

use std::fmt;

/// DOM event names the site listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
    Submit,
    Blur,
    Input,
    DomContentLoaded,
}

impl EventKind {
    /// The DOM event type string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::Submit => "submit",
            Self::Blur => "blur",
            Self::Input => "input",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum ListenerTarget<E> {
    Window,
    Document,
    Element(E),
}

/// One `(target, event, action)` entry of a controller's wiring.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration<E, A> {
    pub target: ListenerTarget<E>,
    pub event: EventKind,
    pub action: A,
}

impl<E, A> Registration<E, A> {
    /// Listen on an element.
    pub fn element(element: E, event: EventKind, action: A) -> Self {
        Self {
            target: ListenerTarget::Element(element),
            event,
            action,
        }
    }

    /// Listen on the window.
    pub fn window(event: EventKind, action: A) -> Self {
        Self {
            target: ListenerTarget::Window,
            event,
            action,
        }
    }

    /// Listen on the document.
    pub fn document(event: EventKind, action: A) -> Self {
        Self {
            target: ListenerTarget::Document,
            event,
            action,
        }
    }
}

/// What the dispatcher learned from the raw event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventContext<E> {
    /// Element the event originated from.
    pub target: Option<E>,
    /// `KeyboardEvent.key`, for key events.
    pub key: Option<String>,
}

impl<E> Default for EventContext<E> {
    fn default() -> Self {
        Self {
            target: None,
            key: None,
        }
    }
}

impl<E> EventContext<E> {
    /// Context for an event raised on `target`.
    pub fn on(target: E) -> Self {
        Self {
            target: Some(target),
            key: None,
        }
    }

    /// Context for a key press.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            target: None,
            key: Some(key.into()),
        }
    }

    /// Whether the key is one that activates a button (Enter or Space).
    #[must_use]
    pub fn is_activation_key(&self) -> bool {
        matches!(self.key.as_deref(), Some("Enter" | " "))
    }
}

/// Outcome of dispatching an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The listener must call `preventDefault()`.
    pub prevent_default: bool,
}

impl Dispatch {
    /// Let the browser's default behaviour proceed.
    #[must_use]
    pub fn proceed() -> Self {
        Self {
            prevent_default: false,
        }
    }

    /// Suppress the browser's default behaviour.
    #[must_use]
    pub fn prevent() -> Self {
        Self {
            prevent_default: true,
        }
    }
}
