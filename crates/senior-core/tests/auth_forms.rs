use assert_matches::assert_matches;
use senior_core::effects::{MockEffects, NodeId, PageEffects};
use senior_core::forms::annotate::{FIELD_ERROR_CLASS, FIELD_MESSAGE_CLASS};
use senior_core::forms::auth::{BUSY_LABEL, INVALID_FORM_MESSAGE, LOADING_CLASS};
use senior_core::forms::honeypot::{BOT_REJECTED_MESSAGE, HONEYPOT_FIELD};
use senior_core::forms::validation::{EMAIL_MESSAGE, PASSWORD_MISMATCH_MESSAGE};
use senior_core::forms::{
    AuthAction, AuthForm, AuthFormKind, SimulatedTransport, SubmissionOutcome, SubmissionState,
    SubmissionTransport, SubmitReport,
};
use senior_core::toast::TOAST_CLASS;
use senior_core::{Dispatch, FieldBinding, FormBindings, SiteConfig, SiteError};
use std::cell::RefCell;
use std::rc::Rc;

struct AuthFixture {
    effects: MockEffects,
    form: NodeId,
    submit: NodeId,
    honeypot: NodeId,
    inputs: Vec<(String, NodeId)>,
}

impl AuthFixture {
    fn input(&self, name: &str) -> NodeId {
        self.inputs
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, node)| *node)
            .expect("fixture input")
    }
}

fn field_names(kind: AuthFormKind) -> &'static [&'static str] {
    match kind {
        AuthFormKind::Login => &["email", "password"],
        AuthFormKind::Signup => &["name", "email", "password", "confirmPassword", "terms"],
        AuthFormKind::Forgot => &["email"],
    }
}

fn auth_page(kind: AuthFormKind) -> AuthFixture {
    let effects = MockEffects::new();
    let page = &effects.page;
    let form = page.insert(page.body_id(), "form", Some(kind.form_id()));

    let inputs = field_names(kind)
        .iter()
        .map(|name| {
            let group = page.insert(form, "div", None);
            let input_type = if *name == "terms" { "checkbox" } else { "text" };
            let node = page.insert_input(group, name, input_type);
            page.with_attr(node, "required", "");
            ((*name).to_string(), node)
        })
        .collect();

    let honeypot = page.insert_input(form, HONEYPOT_FIELD, "text");
    let submit = page.insert(form, "button", None);
    page.with_attr(submit, "type", "submit");
    page.set_text(&submit, kind.idle_label());

    AuthFixture {
        effects,
        form,
        submit,
        honeypot,
        inputs,
    }
}

fn auth_form(
    kind: AuthFormKind,
    fixture: &AuthFixture,
    transport: Rc<dyn SubmissionTransport>,
) -> Rc<AuthForm<MockEffects>> {
    let bindings = fixture.inputs.iter().fold(
        FormBindings::new(fixture.form)
            .with_submit(fixture.submit)
            .with_honeypot(fixture.honeypot),
        |bindings, (name, node)| bindings.with_field(FieldBinding::new(name.clone(), *node, true)),
    );
    Rc::new(AuthForm::new(
        kind,
        fixture.effects.clone(),
        Rc::new(SiteConfig::default()),
        bindings,
        transport,
    ))
}

fn simulated(fixture: &AuthFixture) -> Rc<dyn SubmissionTransport> {
    Rc::new(SimulatedTransport::new(
        fixture.effects.time.clone(),
        Rc::new(SiteConfig::default()),
    ))
}

fn fill_signup(fixture: &AuthFixture) {
    let page = &fixture.effects.page;
    page.type_value(fixture.input("name"), "Ana");
    page.type_value(fixture.input("email"), "ana@x.com");
    page.type_value(fixture.input("password"), "secret1");
    page.type_value(fixture.input("confirmPassword"), "secret1");
    page.set_checked(fixture.input("terms"), true);
}

fn toast_text(fixture: &AuthFixture) -> Vec<(String, Vec<String>)> {
    let page = &fixture.effects.page;
    page.find_by_class(TOAST_CLASS)
        .into_iter()
        .map(|node| (page.text(&node), page.classes(node)))
        .collect()
}

#[tokio::test]
async fn filled_honeypot_never_succeeds() {
    for kind in AuthFormKind::ALL {
        let fixture = auth_page(kind);
        let form = auth_form(kind, &fixture, simulated(&fixture));
        for (name, node) in &fixture.inputs {
            let value = if name == "email" { "ana@x.com" } else { "secret1" };
            fixture.effects.page.type_value(*node, value);
        }
        fixture.effects.page.type_value(fixture.honeypot, "http://spam.example");

        let report = form.submit().await.unwrap();
        assert_eq!(report, SubmitReport::RejectedAsBot);
        assert_eq!(
            toast_text(&fixture),
            vec![(
                BOT_REJECTED_MESSAGE.to_string(),
                vec!["toast".to_string(), "error".to_string()]
            )]
        );
        assert!(fixture.effects.time.sleeps().is_empty());
        assert!(!fixture.effects.page.is_disabled(&fixture.submit));
    }
}

#[tokio::test]
async fn login_success_restores_button() {
    let fixture = auth_page(AuthFormKind::Login);
    let form = auth_form(AuthFormKind::Login, &fixture, simulated(&fixture));
    fixture.effects.page.type_value(fixture.input("email"), "ana@x.com");
    fixture.effects.page.type_value(fixture.input("password"), "123456");

    let busy = Rc::new(RefCell::new(None));
    let probe = fixture.effects.page.clone();
    let submit = fixture.submit;
    let record = busy.clone();
    fixture.effects.time.set_sleep_hook(move |ms| {
        if ms == 1_000 {
            *record.borrow_mut() = Some((
                probe.is_disabled(&submit),
                probe.has_class(&submit, LOADING_CLASS),
                probe.text(&submit),
            ));
        }
    });

    let report = form.submit().await.unwrap();
    assert_matches!(report, SubmitReport::Completed(SubmissionOutcome::Success { .. }));
    assert_eq!(
        busy.borrow().clone(),
        Some((true, true, BUSY_LABEL.to_string()))
    );

    let page = &fixture.effects.page;
    assert!(!page.is_disabled(&fixture.submit));
    assert!(!page.has_class(&fixture.submit, LOADING_CLASS));
    assert_eq!(page.text(&fixture.submit), "Entrar");
    assert_eq!(
        toast_text(&fixture),
        vec![(
            "Login realizado com sucesso! (Simulado)".to_string(),
            vec!["toast".to_string(), "success".to_string()]
        )]
    );
}

#[tokio::test]
async fn signup_and_forgot_use_their_own_delay_and_toast() {
    let fixture = auth_page(AuthFormKind::Signup);
    let form = auth_form(AuthFormKind::Signup, &fixture, simulated(&fixture));
    fill_signup(&fixture);
    form.submit().await.unwrap();
    assert_eq!(fixture.effects.time.sleeps(), vec![1_200]);
    assert_eq!(fixture.effects.page.text(&fixture.submit), "Cadastrar");

    let fixture = auth_page(AuthFormKind::Forgot);
    let form = auth_form(AuthFormKind::Forgot, &fixture, simulated(&fixture));
    fixture.effects.page.type_value(fixture.input("email"), "ana@x.com");
    form.submit().await.unwrap();
    assert_eq!(fixture.effects.time.sleeps(), vec![800]);
    assert_eq!(
        toast_text(&fixture)[0].1,
        vec!["toast".to_string(), "info".to_string()]
    );
    assert_eq!(
        fixture.effects.page.text(&fixture.submit),
        "Enviar link de recuperação"
    );
}

#[tokio::test]
async fn invalid_form_annotates_every_field_and_toasts() {
    let fixture = auth_page(AuthFormKind::Signup);
    let form = auth_form(AuthFormKind::Signup, &fixture, simulated(&fixture));
    let page = &fixture.effects.page;
    page.type_value(fixture.input("confirmPassword"), "abc");

    let report = form.submit().await.unwrap();
    assert_matches!(report, SubmitReport::Invalid { ref messages } if messages.len() == 5);

    for (_, node) in &fixture.inputs {
        assert!(page.has_class(node, FIELD_ERROR_CLASS));
    }
    assert_eq!(toast_text(&fixture)[0].0, INVALID_FORM_MESSAGE);
    assert!(fixture.effects.time.sleeps().is_empty());
}

#[tokio::test]
async fn failing_transport_toasts_form_specific_error() {
    let fixture = auth_page(AuthFormKind::Login);
    let transport = Rc::new(SimulatedTransport::failing(
        fixture.effects.time.clone(),
        Rc::new(SiteConfig::default()),
        "offline",
    ));
    let form = auth_form(AuthFormKind::Login, &fixture, transport);
    fixture.effects.page.type_value(fixture.input("email"), "ana@x.com");
    fixture.effects.page.type_value(fixture.input("password"), "123456");

    let report = form.submit().await.unwrap();
    assert_matches!(report, SubmitReport::Completed(SubmissionOutcome::Failure { .. }));
    assert_eq!(
        toast_text(&fixture),
        vec![(
            "Erro ao fazer login. Tente novamente.".to_string(),
            vec!["toast".to_string(), "error".to_string()]
        )]
    );
    assert!(!fixture.effects.page.is_disabled(&fixture.submit));
    assert_eq!(fixture.effects.page.text(&fixture.submit), "Entrar");
}

#[tokio::test]
async fn button_recovers_when_toast_cannot_be_shown() {
    let fixture = auth_page(AuthFormKind::Login);
    let form = auth_form(AuthFormKind::Login, &fixture, simulated(&fixture));
    let page = &fixture.effects.page;
    page.type_value(fixture.input("email"), "ana@x.com");
    page.type_value(fixture.input("password"), "123456");
    page.hide_body();

    assert_matches!(form.submit().await, Err(SiteError::MissingElement(_)));
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(!page.is_disabled(&fixture.submit));
    assert!(!page.has_class(&fixture.submit, LOADING_CLASS));
    assert_eq!(page.text(&fixture.submit), "Entrar");

    assert_matches!(form.submit().await, Err(SiteError::MissingElement(_)));
    assert_eq!(fixture.effects.time.sleeps(), vec![1_000, 1_000]);
}

#[test]
fn blur_validates_and_input_clears() {
    let fixture = auth_page(AuthFormKind::Login);
    let form = auth_form(AuthFormKind::Login, &fixture, simulated(&fixture));
    let email = fixture.input("email");
    let page = &fixture.effects.page;
    page.type_value(email, "not-an-email");

    assert_eq!(form.dispatch(AuthAction::ValidateField(0)), Dispatch::proceed());
    assert!(page.has_class(&email, FIELD_ERROR_CLASS));
    assert_eq!(page.attribute(&email, "aria-invalid").as_deref(), Some("true"));
    let group = page.parent(&email).unwrap();
    let messages = page.descendants_with_class(&group, FIELD_MESSAGE_CLASS);
    assert_eq!(messages.len(), 1);
    assert_eq!(page.text(&messages[0]), EMAIL_MESSAGE);

    form.dispatch(AuthAction::ClearField(0));
    assert!(!page.has_class(&email, FIELD_ERROR_CLASS));
    assert!(page.descendants_with_class(&group, FIELD_MESSAGE_CLASS).is_empty());
}

#[test]
fn live_password_match_on_signup() {
    let fixture = auth_page(AuthFormKind::Signup);
    let form = auth_form(AuthFormKind::Signup, &fixture, simulated(&fixture));
    let page = &fixture.effects.page;
    let confirm = fixture.input("confirmPassword");
    page.type_value(fixture.input("password"), "secret1");

    page.type_value(confirm, "");
    form.dispatch(AuthAction::MatchPasswords);
    assert!(!page.has_class(&confirm, FIELD_ERROR_CLASS));

    page.type_value(confirm, "secret");
    form.dispatch(AuthAction::MatchPasswords);
    assert!(page.has_class(&confirm, FIELD_ERROR_CLASS));
    assert_eq!(
        page.text(&page.descendants_with_class(&page.parent(&confirm).unwrap(), FIELD_MESSAGE_CLASS)[0]),
        PASSWORD_MISMATCH_MESSAGE
    );

    page.type_value(confirm, "secret1");
    form.dispatch(AuthAction::MatchPasswords);
    assert!(!page.has_class(&confirm, FIELD_ERROR_CLASS));
}

#[test]
fn signup_registers_live_confirmation_check() {
    let fixture = auth_page(AuthFormKind::Signup);
    let signup = auth_form(AuthFormKind::Signup, &fixture, simulated(&fixture));
    // submit + blur/input per required field + live confirmation
    assert_eq!(signup.registrations().len(), 1 + 2 * 5 + 1);

    let fixture = auth_page(AuthFormKind::Login);
    let login = auth_form(AuthFormKind::Login, &fixture, simulated(&fixture));
    assert!(!login
        .registrations()
        .iter()
        .any(|r| r.action == AuthAction::MatchPasswords));
}

#[tokio::test]
async fn submit_dispatch_prevents_default_and_runs_lifecycle() {
    let fixture = auth_page(AuthFormKind::Forgot);
    let form = auth_form(AuthFormKind::Forgot, &fixture, simulated(&fixture));
    fixture.effects.page.type_value(fixture.input("email"), "ana@x.com");

    assert_eq!(form.dispatch(AuthAction::Submit), Dispatch::prevent());
    fixture.effects.tasks.run_until_idle().await;

    // Request delay, then the toast lifecycle.
    assert_eq!(fixture.effects.time.sleeps(), vec![800, 100, 5_000, 300]);
    assert!(toast_text(&fixture).is_empty());
}
