//! Page bindings
//!
//! Element handles resolved once at start-up and injected into the
//! controllers. Optional handles are `None` when the page does not render the
//! element; the corresponding wiring is skipped.

use crate::forms::validation::FieldKind;

/// Element ids the site expects.
pub mod ids {
    pub const HEADER: &str = "header";
    pub const NAV_MENU: &str = "nav-menu";
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const NAV_CLOSE: &str = "nav-close";
    pub const BACK_TO_TOP: &str = "backToTop";
    pub const CONTACT_FORM: &str = "contatoForm";
    pub const LOGIN_FORM: &str = "loginForm";
    pub const SIGNUP_FORM: &str = "signupForm";
    pub const FORGOT_FORM: &str = "forgotForm";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
}

/// Selectors used to collect element groups.
pub mod selectors {
    pub const NAV_LINKS: &str = ".nav__link";
    pub const HERO_BUTTONS: &str = ".hero__buttons .btn";
    pub const SECTIONS: &str = ".section";
    pub const REQUIRED_INPUTS: &str = "input[required]";
    pub const NAMED_CONTROLS: &str = "input[name], textarea[name], select[name]";
    pub const HONEYPOT: &str = "input[name=\"website\"]";
    pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
}

/// Handles used by the navigation and scroll controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBindings<E> {
    pub header: Option<E>,
    pub nav_menu: Option<E>,
    pub nav_toggle: Option<E>,
    pub nav_close: Option<E>,
    pub nav_links: Vec<E>,
    pub hero_buttons: Vec<E>,
    pub back_to_top: Option<E>,
    pub sections: Vec<E>,
}

impl<E> Default for PageBindings<E> {
    fn default() -> Self {
        Self {
            header: None,
            nav_menu: None,
            nav_toggle: None,
            nav_close: None,
            nav_links: Vec::new(),
            hero_buttons: Vec::new(),
            back_to_top: None,
            sections: Vec::new(),
        }
    }
}

/// One form control.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding<E> {
    /// The control's `name` attribute.
    pub name: String,
    pub kind: FieldKind,
    pub element: E,
    pub required: bool,
}

impl<E> FieldBinding<E> {
    /// Bind a control, deriving its kind from `name`.
    pub fn new(name: impl Into<String>, element: E, required: bool) -> Self {
        let name = name.into();
        Self {
            kind: FieldKind::from_name(&name),
            name,
            element,
            required,
        }
    }
}

/// Handles for one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormBindings<E> {
    pub form: E,
    pub submit: Option<E>,
    pub fields: Vec<FieldBinding<E>>,
    pub honeypot: Option<E>,
}

impl<E> FormBindings<E> {
    pub fn new(form: E) -> Self {
        Self {
            form,
            submit: None,
            fields: Vec::new(),
            honeypot: None,
        }
    }

    pub fn with_submit(mut self, submit: E) -> Self {
        self.submit = Some(submit);
        self
    }

    pub fn with_field(mut self, field: FieldBinding<E>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_honeypot(mut self, honeypot: E) -> Self {
        self.honeypot = Some(honeypot);
        self
    }

    /// First control with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldBinding<E>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// First control of the given kind.
    pub fn field_of_kind(&self, kind: FieldKind) -> Option<&FieldBinding<E>> {
        self.fields.iter().find(|field| field.kind == kind)
    }

    /// Controls marked `required`, in document order.
    pub fn required_fields(&self) -> impl Iterator<Item = (usize, &FieldBinding<E>)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.required)
    }
}
