//! Form workflows
//!
//! - [`validation`]: pure field and contact rules
//! - [`annotate`]: inline error rendering next to controls
//! - [`honeypot`]: bot filter
//! - [`submission`]: `Idle`/`Submitting` state, busy control, transport seam
//! - [`contact`]: the contact form on the landing page
//! - [`auth`]: login, signup and password recovery forms

pub mod annotate;
pub mod auth;
pub mod contact;
pub mod honeypot;
pub mod submission;
pub mod validation;

pub use annotate::FieldAnnotator;
pub use auth::{AuthAction, AuthForm, AuthFormKind};
pub use contact::{ContactAction, ContactForm, ContactPayload};
pub use honeypot::{is_bot, is_bot_value};
pub use submission::{
    SimulatedTransport, SubmissionOutcome, SubmissionRequest, SubmissionState,
    SubmissionTransport, SubmitControl, SubmitReport,
};
pub use validation::{
    email_ok, password_match, validate_contact, validate_field, ContactError, FieldInput,
    FieldKind, FieldRule, FieldVerdict,
};
