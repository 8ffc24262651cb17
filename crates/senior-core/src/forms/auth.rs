//! Authentication forms (login, signup, password recovery)
//!
//! Every auth page carries exactly one of the three forms. Required inputs are
//! validated on blur and cleared while typing; the signup form also checks the
//! confirmation against the password live. Submission is simulated through the
//! [`SubmissionTransport`] seam and reported with a toast.

use super::annotate::FieldAnnotator;
use super::honeypot::{is_bot, BOT_REJECTED_MESSAGE};
use super::submission::{
    SubmissionOutcome, SubmissionRequest, SubmissionState, SubmissionTransport, SubmitControl,
    SubmitReport,
};
use super::validation::{password_match, validate_field, FieldInput, FieldKind, FieldVerdict};
use crate::bindings::{ids, FieldBinding, FormBindings};
use crate::config::SiteConfig;
use crate::effects::SiteEffects;
use crate::error::SiteResult;
use crate::events::{Dispatch, EventKind, Registration};
use crate::toast::{Toast, ToastLayer};
use std::fmt;
use std::rc::Rc;

pub const BUSY_LABEL: &str = "Processando...";
pub const LOADING_CLASS: &str = "btn--loading";
pub const INVALID_FORM_MESSAGE: &str = "Por favor, corrija os erros no formulário";

/// The three auth forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthFormKind {
    Login,
    Signup,
    Forgot,
}

impl AuthFormKind {
    pub const ALL: [Self; 3] = [Self::Login, Self::Signup, Self::Forgot];

    /// `id` of the form element.
    #[must_use]
    pub fn form_id(self) -> &'static str {
        match self {
            Self::Login => ids::LOGIN_FORM,
            Self::Signup => ids::SIGNUP_FORM,
            Self::Forgot => ids::FORGOT_FORM,
        }
    }

    /// Label of the submit button when idle.
    #[must_use]
    pub fn idle_label(self) -> &'static str {
        match self {
            Self::Login => "Entrar",
            Self::Signup => "Cadastrar",
            Self::Forgot => "Enviar link de recuperação",
        }
    }

    /// Simulated request latency.
    pub fn delay_ms(self, config: &SiteConfig) -> u64 {
        match self {
            Self::Login => config.login_delay_ms,
            Self::Signup => config.signup_delay_ms,
            Self::Forgot => config.forgot_delay_ms,
        }
    }

    pub fn success_toast(self) -> Toast {
        match self {
            Self::Login => Toast::success("Login realizado com sucesso! (Simulado)"),
            Self::Signup => {
                Toast::success("Conta criada com sucesso! (Simulado - confirmação por email)")
            }
            Self::Forgot => {
                Toast::info("Se o email existir, enviaremos o link de recuperação. (Simulado)")
            }
        }
    }

    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Erro ao fazer login. Tente novamente.",
            Self::Signup => "Erro ao criar conta. Tente novamente.",
            Self::Forgot => "Erro ao enviar link. Tente novamente.",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Forgot => "forgot",
        }
    }

    /// The form a page path belongs to, if any.
    ///
    /// `/auth/login.html` and `/login` both select the login form.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            let name = kind.as_str();
            path.contains(&format!("{name}.html")) || path.ends_with(&format!("/{name}"))
        })
    }
}

impl fmt::Display for AuthFormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions an auth form listens for. Indices refer to
/// [`FormBindings::fields`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Submit,
    ValidateField(usize),
    ClearField(usize),
    MatchPasswords,
}

/// Controller for one auth form.
pub struct AuthForm<E: SiteEffects> {
    kind: AuthFormKind,
    effects: E,
    config: Rc<SiteConfig>,
    bindings: FormBindings<E::Element>,
    transport: Rc<dyn SubmissionTransport>,
    annotator: FieldAnnotator<E>,
    toasts: ToastLayer<E>,
    control: SubmitControl<E>,
}

impl<E: SiteEffects> AuthForm<E> {
    pub fn new(
        kind: AuthFormKind,
        effects: E,
        config: Rc<SiteConfig>,
        bindings: FormBindings<E::Element>,
        transport: Rc<dyn SubmissionTransport>,
    ) -> Self {
        Self {
            kind,
            annotator: FieldAnnotator::new(effects.clone()),
            toasts: ToastLayer::new(effects.clone(), config.clone()),
            control: SubmitControl::new(effects.clone(), bindings.submit.clone()),
            effects,
            config,
            bindings,
            transport,
        }
    }

    pub fn kind(&self) -> AuthFormKind {
        self.kind
    }

    pub fn bindings(&self) -> &FormBindings<E::Element> {
        &self.bindings
    }

    pub fn state(&self) -> SubmissionState {
        self.control.state()
    }

    /// Submit on the form, blur/input on each required control, and the live
    /// confirmation check on signup.
    pub fn registrations(&self) -> Vec<Registration<E::Element, AuthAction>> {
        let mut registrations = vec![Registration::element(
            self.bindings.form.clone(),
            EventKind::Submit,
            AuthAction::Submit,
        )];

        for (index, field) in self.bindings.required_fields() {
            registrations.push(Registration::element(
                field.element.clone(),
                EventKind::Blur,
                AuthAction::ValidateField(index),
            ));
            registrations.push(Registration::element(
                field.element.clone(),
                EventKind::Input,
                AuthAction::ClearField(index),
            ));
        }

        if self.kind == AuthFormKind::Signup && self.password().is_some() {
            if let Some(confirm) = self.confirmation() {
                registrations.push(Registration::element(
                    confirm.element.clone(),
                    EventKind::Input,
                    AuthAction::MatchPasswords,
                ));
            }
        }

        registrations
    }

    pub fn dispatch(self: &Rc<Self>, action: AuthAction) -> Dispatch {
        let result = match action {
            AuthAction::Submit => {
                let form = Rc::clone(self);
                self.effects.spawn_local(Box::pin(async move {
                    if let Err(err) = form.submit().await {
                        tracing::error!(target: "senior::auth", "{} submit failed: {}", form.kind, err);
                    }
                }));
                return Dispatch::prevent();
            }
            AuthAction::ValidateField(index) => self.validate_index(index).map(|_| ()),
            AuthAction::ClearField(index) => match self.bindings.fields.get(index) {
                Some(field) => self.annotator.clear(&field.element),
                None => Ok(()),
            },
            AuthAction::MatchPasswords => self.check_password_match().map(|_| ()),
        };

        if let Err(err) = result {
            tracing::debug!(target: "senior::auth", "{:?} failed: {}", action, err);
        }
        Dispatch::proceed()
    }

    /// Validate and annotate one control.
    pub fn validate_field(&self, field: &FieldBinding<E::Element>) -> SiteResult<bool> {
        let verdict = self.verdict(field);
        self.annotator.apply(&field.element, &verdict)?;
        Ok(verdict.is_valid())
    }

    /// Validate every required control, then the confirmation on signup.
    ///
    /// Every control is annotated; a failure does not stop the pass.
    pub fn validate_form(&self) -> SiteResult<bool> {
        let mut valid = true;
        for (_, field) in self.bindings.required_fields() {
            valid &= self.validate_field(field)?;
        }
        if self.kind == AuthFormKind::Signup {
            valid &= self.check_password_match()?;
        }
        Ok(valid)
    }

    /// Annotate the confirmation with the live match check.
    ///
    /// Returns `true` when the form has no password pair.
    pub fn check_password_match(&self) -> SiteResult<bool> {
        let (Some(password), Some(confirm)) = (self.password(), self.confirmation()) else {
            return Ok(true);
        };
        let verdict = password_match(
            &self.effects.value(&password.element),
            &self.effects.value(&confirm.element),
        );
        self.annotator.apply(&confirm.element, &verdict)?;
        Ok(verdict.is_valid())
    }

    /// Run one submission: bot check, validation, simulated request, toast.
    pub async fn submit(&self) -> SiteResult<SubmitReport> {
        if self.control.state() == SubmissionState::Submitting {
            return Ok(SubmitReport::Ignored);
        }

        if is_bot(&self.effects, self.bindings.honeypot.as_ref()) {
            tracing::warn!(target: "senior::auth", "{} honeypot filled", self.kind);
            self.toasts.show(&Toast::error(BOT_REJECTED_MESSAGE))?;
            return Ok(SubmitReport::RejectedAsBot);
        }

        if !self.validate_form()? {
            self.toasts.show(&Toast::error(INVALID_FORM_MESSAGE))?;
            return Ok(SubmitReport::Invalid {
                messages: self.messages(),
            });
        }

        if !self.control.begin(BUSY_LABEL, Some(LOADING_CLASS))? {
            return Ok(SubmitReport::Ignored);
        }

        let delivered = self
            .transport
            .deliver(&SubmissionRequest::Auth(self.kind))
            .await;

        let (outcome, shown) = match delivered {
            Ok(SubmissionOutcome::Success { message }) => {
                tracing::info!(target: "senior::auth", "{} succeeded", self.kind);
                let mut toast = self.kind.success_toast();
                toast.message.clone_from(&message);
                (SubmissionOutcome::success(message), self.toasts.show(&toast))
            }
            Ok(SubmissionOutcome::Failure { message }) => {
                tracing::error!(target: "senior::auth", "{} rejected: {}", self.kind, message);
                let shown = self.toasts.show(&Toast::error(self.kind.failure_message()));
                (SubmissionOutcome::failure(message), shown)
            }
            Err(err) => {
                let category = err.category();
                tracing::error!(
                    target: "senior::auth",
                    category = %category,
                    "{} failed: {}",
                    self.kind,
                    err
                );
                let toast = Toast::new(self.kind.failure_message(), category.toast_level());
                (SubmissionOutcome::failure(err.to_string()), self.toasts.show(&toast))
            }
        };

        // The control returns to idle even when the toast could not be shown.
        let finished = self
            .control
            .finish(self.kind.idle_label(), Some(LOADING_CLASS));
        shown?;
        finished?;
        Ok(SubmitReport::Completed(outcome))
    }

    fn validate_index(&self, index: usize) -> SiteResult<bool> {
        match self.bindings.fields.get(index) {
            Some(field) => self.validate_field(field),
            None => Ok(true),
        }
    }

    fn verdict(&self, field: &FieldBinding<E::Element>) -> FieldVerdict {
        let value = self.effects.value(&field.element);
        let value = value.trim();
        match field.kind {
            FieldKind::Terms => validate_field(
                field.kind,
                &FieldInput::checkbox(self.effects.is_checked(&field.element)),
                &self.config,
            ),
            FieldKind::ConfirmPassword => {
                let password = self
                    .password()
                    .map(|password| self.effects.value(&password.element))
                    .unwrap_or_default();
                validate_field(
                    field.kind,
                    &FieldInput::confirmation(value, &password),
                    &self.config,
                )
            }
            kind => validate_field(kind, &FieldInput::text(value), &self.config),
        }
    }

    /// Messages currently rendered next to the controls.
    fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for field in &self.bindings.fields {
            if let Some(message) = self.annotator.message_for(&field.element) {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
        }
        messages
    }

    fn password(&self) -> Option<&FieldBinding<E::Element>> {
        self.bindings.field_of_kind(FieldKind::Password)
    }

    fn confirmation(&self) -> Option<&FieldBinding<E::Element>> {
        self.bindings.field_of_kind(FieldKind::ConfirmPassword)
    }
}
