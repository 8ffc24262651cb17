//! Field validation rules
//!
//! Pure predicates over field values. Annotating the page with the verdict is
//! the job of [`super::annotate::FieldAnnotator`].

use super::contact::ContactPayload;
use crate::config::SiteConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[allow(clippy::unwrap_used)]
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const EMAIL_MESSAGE: &str = "Digite um email válido";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "As senhas não coincidem";
pub const TERMS_MESSAGE: &str = "Você deve aceitar os termos e LGPD";

/// Message for a password shorter than `min` characters.
pub fn password_message(min: usize) -> String {
    format!("A senha deve ter pelo menos {min} caracteres")
}

/// Message for a name shorter than `min` characters.
pub fn name_message(min: usize) -> String {
    format!("O nome deve ter pelo menos {min} caracteres")
}

/// Whether `value` looks like an email address (`local@domain.tld`, no spaces).
pub fn email_ok(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Which rule applies to a control, derived from its `name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Email,
    Password,
    ConfirmPassword,
    Name,
    Terms,
    /// No rule; always valid.
    Other,
}

impl FieldKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "email" => Self::Email,
            "password" => Self::Password,
            "confirmPassword" => Self::ConfirmPassword,
            "name" => Self::Name,
            "terms" => Self::Terms,
            _ => Self::Other,
        }
    }
}

/// The data a rule looks at.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldInput<'a> {
    pub value: &'a str,
    pub checked: bool,
    /// Current password value, for the confirmation rule.
    pub password: Option<&'a str>,
}

impl<'a> FieldInput<'a> {
    pub fn text(value: &'a str) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    pub fn confirmation(value: &'a str, password: &'a str) -> Self {
        Self {
            value,
            checked: false,
            password: Some(password),
        }
    }
}

/// Result of validating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldVerdict {
    Valid,
    Invalid { message: String },
}

impl FieldVerdict {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message),
        }
    }
}

/// A `{field, predicate, message}` triple.
///
/// Both the predicate and the message read the configured minimum lengths, so
/// a message always names the limit its predicate applied.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: FieldKind,
    pub predicate: fn(&FieldInput<'_>, &SiteConfig) -> bool,
    pub message: fn(&SiteConfig) -> String,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl FieldRule {
    /// The rule for a field kind, if it has one.
    #[must_use]
    pub fn for_kind(kind: FieldKind) -> Option<Self> {
        let rule = match kind {
            FieldKind::Email => Self {
                field: kind,
                predicate: |input, _| email_ok(input.value.trim()),
                message: |_| EMAIL_MESSAGE.to_string(),
            },
            FieldKind::Password => Self {
                field: kind,
                predicate: |input, config| {
                    input.value.trim().chars().count() >= config.min_password_length
                },
                message: |config| password_message(config.min_password_length),
            },
            FieldKind::ConfirmPassword => Self {
                field: kind,
                predicate: |input, _| Some(input.value.trim()) == input.password,
                message: |_| PASSWORD_MISMATCH_MESSAGE.to_string(),
            },
            FieldKind::Name => Self {
                field: kind,
                predicate: |input, config| {
                    input.value.trim().chars().count() >= config.min_name_length
                },
                message: |config| name_message(config.min_name_length),
            },
            FieldKind::Terms => Self {
                field: kind,
                predicate: |input, _| input.checked,
                message: |_| TERMS_MESSAGE.to_string(),
            },
            FieldKind::Other => return None,
        };
        Some(rule)
    }

    pub fn check(&self, input: &FieldInput<'_>, config: &SiteConfig) -> FieldVerdict {
        if (self.predicate)(input, config) {
            FieldVerdict::Valid
        } else {
            FieldVerdict::invalid((self.message)(config))
        }
    }
}

/// Validate one field against its rule.
pub fn validate_field(kind: FieldKind, input: &FieldInput<'_>, config: &SiteConfig) -> FieldVerdict {
    FieldRule::for_kind(kind).map_or(FieldVerdict::Valid, |rule| rule.check(input, config))
}

/// Live check used while the user types the confirmation.
///
/// An empty confirmation is not reported yet.
pub fn password_match(password: &str, confirm: &str) -> FieldVerdict {
    if !confirm.is_empty() && password != confirm {
        FieldVerdict::invalid(PASSWORD_MISMATCH_MESSAGE)
    } else {
        FieldVerdict::Valid
    }
}

// ============================================================================
// Contact form
// ============================================================================

/// One failed contact-form rule. Length rules carry the minimum they applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactError {
    NameTooShort { min: usize },
    InvalidEmail,
    MessageTooShort { min: usize },
    PrivacyNotAccepted,
}

impl ContactError {
    #[must_use]
    pub fn message(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort { min } => write!(f, "Nome deve ter pelo menos {min} caracteres"),
            Self::InvalidEmail => f.write_str("Email deve ser válido"),
            Self::MessageTooShort { min } => {
                write!(f, "Mensagem deve ter pelo menos {min} caracteres")
            }
            Self::PrivacyNotAccepted => f.write_str("Você deve aceitar os termos de privacidade"),
        }
    }
}

/// Every failed rule of a contact payload, in field order.
pub fn validate_contact(payload: &ContactPayload, config: &SiteConfig) -> Vec<ContactError> {
    let mut errors = Vec::new();

    if payload.nome.trim().chars().count() < config.min_name_length {
        errors.push(ContactError::NameTooShort {
            min: config.min_name_length,
        });
    }
    if !email_ok(&payload.email) {
        errors.push(ContactError::InvalidEmail);
    }
    if payload.mensagem.trim().chars().count() < config.min_message_length {
        errors.push(ContactError::MessageTooShort {
            min: config.min_message_length,
        });
    }
    if !payload.lgpd {
        errors.push(ContactError::PrivacyNotAccepted);
    }

    errors
}
