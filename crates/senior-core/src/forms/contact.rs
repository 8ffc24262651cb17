//! Contact form workflow
//!
//! Validation errors and the transport failure are rendered as `.form__error`
//! banners appended to the form; success as a `.form__success` banner that
//! expires on its own. The form is reset after a successful send.

use super::submission::{
    SubmissionOutcome, SubmissionRequest, SubmissionState, SubmissionTransport, SubmitControl,
    SubmitReport,
};
use super::validation::validate_contact;
use crate::bindings::FormBindings;
use crate::config::SiteConfig;
use crate::effects::SiteEffects;
use crate::error::{SiteError, SiteResult};
use crate::events::{Dispatch, EventKind, Registration};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const FORM_ERROR_CLASS: &str = "form__error";
pub const FORM_SUCCESS_CLASS: &str = "form__success";

pub const SENDING_LABEL: &str = "Enviando...";
pub const SENT_MESSAGE: &str = "Mensagem enviada com sucesso! Entraremos em contato em breve.";
pub const RETRY_MESSAGE: &str = "Erro ao enviar formulário. Tente novamente.";

/// Contents of the contact form. Missing keys deserialize as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    pub nome: String,
    pub email: String,
    pub mensagem: String,
    pub lgpd: bool,
}

/// Actions the contact form listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactAction {
    Submit,
}

/// Controller for the contact form.
pub struct ContactForm<E: SiteEffects> {
    effects: E,
    config: Rc<SiteConfig>,
    bindings: FormBindings<E::Element>,
    transport: Rc<dyn SubmissionTransport>,
    control: SubmitControl<E>,
}

impl<E: SiteEffects> ContactForm<E> {
    pub fn new(
        effects: E,
        config: Rc<SiteConfig>,
        bindings: FormBindings<E::Element>,
        transport: Rc<dyn SubmissionTransport>,
    ) -> Self {
        let control = SubmitControl::new(effects.clone(), bindings.submit.clone());
        Self {
            effects,
            config,
            bindings,
            transport,
            control,
        }
    }

    pub fn bindings(&self) -> &FormBindings<E::Element> {
        &self.bindings
    }

    pub fn state(&self) -> SubmissionState {
        self.control.state()
    }

    pub fn registrations(&self) -> Vec<Registration<E::Element, ContactAction>> {
        vec![Registration::element(
            self.bindings.form.clone(),
            EventKind::Submit,
            ContactAction::Submit,
        )]
    }

    /// Handle a listener firing. Submission runs as a spawned task.
    pub fn dispatch(self: &Rc<Self>, action: ContactAction) -> Dispatch {
        match action {
            ContactAction::Submit => {
                let form = Rc::clone(self);
                self.effects.spawn_local(Box::pin(async move {
                    if let Err(err) = form.submit().await {
                        tracing::error!(target: "senior::forms", "contact submit failed: {}", err);
                    }
                }));
                Dispatch::prevent()
            }
        }
    }

    /// Read the current field values.
    pub fn payload(&self) -> ContactPayload {
        let text = |name: &str| {
            self.bindings
                .field(name)
                .map(|field| self.effects.value(&field.element))
                .unwrap_or_default()
        };
        ContactPayload {
            nome: text("nome"),
            email: text("email"),
            mensagem: text("mensagem"),
            lgpd: self
                .bindings
                .field("lgpd")
                .is_some_and(|field| self.effects.is_checked(&field.element)),
        }
    }

    /// Check a payload against the contact rules.
    ///
    /// Fails with [`SiteError::Validation`] carrying every message, in field order.
    pub fn validate(&self, payload: &ContactPayload) -> SiteResult<()> {
        let errors = validate_contact(payload, &self.config);
        if errors.is_empty() {
            return Ok(());
        }
        Err(SiteError::Validation(
            errors.iter().map(ToString::to_string).collect(),
        ))
    }

    /// Run one submission: validate, send, render the outcome.
    pub async fn submit(&self) -> SiteResult<SubmitReport> {
        if self.control.state() == SubmissionState::Submitting {
            return Ok(SubmitReport::Ignored);
        }
        let payload = self.payload();

        match self.validate(&payload) {
            Ok(()) => self.clear_errors(),
            Err(SiteError::Validation(messages)) => {
                self.show_errors(&messages)?;
                return Ok(SubmitReport::Invalid { messages });
            }
            Err(err) => return Err(err),
        }

        let original_label = self.control.label();
        if !self.control.begin(SENDING_LABEL, None)? {
            return Ok(SubmitReport::Ignored);
        }

        let delivered = self
            .transport
            .deliver(&SubmissionRequest::Contact(payload))
            .await;

        let (outcome, rendered) = match delivered {
            Ok(SubmissionOutcome::Success { message }) => {
                tracing::info!(target: "senior::forms", "contact sent: {}", message);
                (SubmissionOutcome::success(message), self.show_success())
            }
            Ok(SubmissionOutcome::Failure { message }) => {
                tracing::error!(target: "senior::forms", "contact rejected: {}", message);
                let rendered = self.show_errors(&[RETRY_MESSAGE.to_string()]);
                (SubmissionOutcome::failure(message), rendered)
            }
            Err(err) => {
                tracing::error!(
                    target: "senior::forms",
                    category = %err.category(),
                    "contact send error: {}",
                    err
                );
                let rendered = self.show_errors(&[RETRY_MESSAGE.to_string()]);
                (SubmissionOutcome::failure(err.to_string()), rendered)
            }
        };

        // The control returns to idle even when the outcome could not be shown.
        let finished = self.control.finish(&original_label, None);
        rendered?;
        finished?;
        Ok(SubmitReport::Completed(outcome))
    }

    /// Replace any banners with one `.form__error` per message.
    pub fn show_errors(&self, messages: &[String]) -> SiteResult<()> {
        self.clear_errors();
        for message in messages {
            self.append_banner(FORM_ERROR_CLASS, message)?;
        }
        Ok(())
    }

    pub fn clear_errors(&self) {
        for node in self
            .effects
            .descendants_with_class(&self.bindings.form, FORM_ERROR_CLASS)
        {
            self.effects.remove(&node);
        }
    }

    fn show_success(&self) -> SiteResult<()> {
        self.clear_errors();
        let banner = self.append_banner(FORM_SUCCESS_CLASS, SENT_MESSAGE)?;
        self.effects.reset_form(&self.bindings.form)?;

        let effects = self.effects.clone();
        let wait = self.config.success_banner_ms;
        self.effects.spawn_local(Box::pin(async move {
            effects.sleep_ms(wait).await;
            effects.remove(&banner);
        }));
        Ok(())
    }

    fn append_banner(&self, class: &str, text: &str) -> SiteResult<E::Element> {
        let node = self.effects.create_element("div")?;
        self.effects.set_attribute(&node, "class", class)?;
        self.effects.set_text(&node, text);
        self.effects.append_child(&self.bindings.form, &node)?;
        Ok(node)
    }
}
