//! Submission state, busy control and the simulated transport
//!
//! `Idle → Submitting → Idle`. While submitting, the trigger control is
//! disabled and shows a busy label. The transport is the only seam that can
//! fail; the shipped [`SimulatedTransport`] waits out a fixed delay and
//! reports success.

use super::auth::AuthFormKind;
use super::contact::ContactPayload;
use crate::config::SiteConfig;
use crate::effects::{PageEffects, TimeEffects};
use crate::error::SiteResult;
use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;

/// Message returned by a successful simulated contact send.
pub const CONTACT_SENT_MESSAGE: &str = "Formulário enviado com sucesso!";

/// Where a form is in its submission cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Tagged result of a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { message: String },
    Failure { message: String },
}

impl SubmissionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Failure { message } => message,
        }
    }
}

/// How a submit event was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitReport {
    /// The honeypot was filled.
    RejectedAsBot,
    /// Local validation failed; nothing was sent.
    Invalid { messages: Vec<String> },
    /// A submission was already in flight.
    Ignored,
    /// The transport answered.
    Completed(SubmissionOutcome),
}

/// Payload handed to the transport.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionRequest {
    Contact(ContactPayload),
    Auth(AuthFormKind),
}

/// Delivers a submission. Errors are simulated transport failures.
#[async_trait(?Send)]
pub trait SubmissionTransport {
    async fn deliver(&self, request: &SubmissionRequest) -> SiteResult<SubmissionOutcome>;
}

/// Stand-in for a backend: waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedTransport<T> {
    time: T,
    config: Rc<SiteConfig>,
    failure: Option<String>,
}

impl<T: TimeEffects> SimulatedTransport<T> {
    pub fn new(time: T, config: Rc<SiteConfig>) -> Self {
        Self {
            time,
            config,
            failure: None,
        }
    }

    /// A transport whose every delivery fails with `message` after the delay.
    pub fn failing(time: T, config: Rc<SiteConfig>, message: impl Into<String>) -> Self {
        Self {
            time,
            config,
            failure: Some(message.into()),
        }
    }

    /// Simulated latency for a request.
    pub fn delay_ms(&self, request: &SubmissionRequest) -> u64 {
        match request {
            SubmissionRequest::Contact(_) => self.config.contact_send_delay_ms,
            SubmissionRequest::Auth(kind) => kind.delay_ms(&self.config),
        }
    }
}

#[async_trait(?Send)]
impl<T: TimeEffects> SubmissionTransport for SimulatedTransport<T> {
    async fn deliver(&self, request: &SubmissionRequest) -> SiteResult<SubmissionOutcome> {
        if let SubmissionRequest::Contact(payload) = request {
            // Mirrors what a real backend would receive.
            match serde_json::to_string(payload) {
                Ok(json) => tracing::info!(target: "senior::forms", "Dados do formulário: {}", json),
                Err(err) => tracing::debug!("payload not serialisable: {}", err),
            }
        }

        self.time.sleep_ms(self.delay_ms(request)).await;

        if let Some(message) = &self.failure {
            return Err(crate::error::SiteError::transport(message.clone()));
        }

        Ok(match request {
            SubmissionRequest::Contact(_) => SubmissionOutcome::success(CONTACT_SENT_MESSAGE),
            SubmissionRequest::Auth(kind) => SubmissionOutcome::success(kind.success_toast().message),
        })
    }
}

/// The submit button of a form and its busy presentation.
#[derive(Debug)]
pub struct SubmitControl<P: PageEffects> {
    page: P,
    button: Option<P::Element>,
    state: Cell<SubmissionState>,
}

impl<P: PageEffects> SubmitControl<P> {
    pub fn new(page: P, button: Option<P::Element>) -> Self {
        Self {
            page,
            button,
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Enter `Submitting`. Returns `false` if already submitting.
    ///
    /// If the control cannot be marked busy the state stays `Idle`.
    pub fn begin(&self, busy_label: &str, loading_class: Option<&str>) -> SiteResult<bool> {
        if self.state.get() == SubmissionState::Submitting {
            return Ok(false);
        }
        self.state.set(SubmissionState::Submitting);

        if let Err(err) = self.mark_busy(busy_label, loading_class) {
            self.state.set(SubmissionState::Idle);
            return Err(err);
        }
        Ok(true)
    }

    fn mark_busy(&self, busy_label: &str, loading_class: Option<&str>) -> SiteResult<()> {
        if let Some(button) = &self.button {
            self.page.set_disabled(button, true)?;
            if let Some(class) = loading_class {
                self.page.add_class(button, class)?;
            }
            self.page.set_text(button, busy_label);
        }
        Ok(())
    }

    /// Return to `Idle`, re-enabling the control with `label`.
    pub fn finish(&self, label: &str, loading_class: Option<&str>) -> SiteResult<()> {
        self.state.set(SubmissionState::Idle);

        if let Some(button) = &self.button {
            self.page.set_disabled(button, false)?;
            if let Some(class) = loading_class {
                self.page.remove_class(button, class)?;
            }
            self.page.set_text(button, label);
        }
        Ok(())
    }

    /// Current label of the control.
    pub fn label(&self) -> String {
        self.button
            .as_ref()
            .map(|button| self.page.text(button))
            .unwrap_or_default()
    }
}
