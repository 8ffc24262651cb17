//! # Senior Core
//!
//! Portable page logic for the Senior Expert marketing site.
//!
//! Nothing in this crate touches the browser directly. Every page interaction
//! goes through the effect traits in [`effects`], so controllers and
//! workflows run unchanged against the real DOM (`senior-web`) and against
//! the in-memory handlers used by the tests.
//!
//! ## Modules
//!
//! - [`nav`]: mobile menu, scroll-driven header and back-to-top state,
//!   anchor smooth scrolling, one-shot section reveal
//! - [`forms`]: field validation, honeypot check, contact and auth
//!   submission workflows
//! - [`toast`]: single-slot transient notifications
//! - [`events`]: registration lists describing the listener wiring
//! - [`debounce`]: trailing-edge debounce over [`effects::TimeEffects`]

pub mod bindings;
pub mod config;
pub mod debounce;
pub mod effects;
pub mod error;
pub mod events;
pub mod forms;
pub mod nav;
pub mod toast;

pub use bindings::{FieldBinding, FormBindings, PageBindings};
pub use config::SiteConfig;
pub use effects::{PageEffects, ScrollBehavior, SiteEffects, SpawnEffects, TimeEffects};
pub use error::{ErrorCategory, SiteError, SiteResult};
pub use events::{Dispatch, EventContext, EventKind, ListenerTarget, Registration};
pub use forms::{AuthForm, AuthFormKind, ContactForm, ContactPayload, SimulatedTransport};
pub use nav::{NavAction, NavController};
pub use toast::{Toast, ToastLayer, ToastLevel};
