use senior_core::effects::{MockEffects, NodeId, PageEffects, ScrollBehavior};
use senior_core::nav::controller::{
    FADE_IN_CLASS, NO_SCROLL_CLASS, SCROLLED_CLASS, SHOW_MENU_CLASS, VISIBLE_CLASS,
};
use senior_core::{
    Dispatch, EventContext, EventKind, ListenerTarget, NavAction, NavController, PageBindings,
    SiteConfig,
};
use std::rc::Rc;

struct Landing {
    effects: MockEffects,
    header: NodeId,
    menu: NodeId,
    toggle: NodeId,
    close: NodeId,
    link: NodeId,
    hero_button: NodeId,
    back_to_top: NodeId,
    sections: Vec<NodeId>,
    target: NodeId,
}

fn landing_page() -> Landing {
    let effects = MockEffects::new();
    let page = &effects.page;
    let body = page.body_id();

    let header = page.insert(body, "header", Some("header"));
    page.set_geometry(header, 0.0, 80.0);
    let menu = page.insert(header, "div", Some("nav-menu"));
    let link = page.insert(menu, "a", None);
    page.with_class(link, "nav__link");
    page.with_attr(link, "href", "#servicos");
    let close = page.insert(menu, "div", Some("nav-close"));
    let toggle = page.insert(header, "div", Some("nav-toggle"));

    let hero = page.insert(body, "div", None);
    page.with_class(hero, "hero__buttons");
    let hero_button = page.insert(hero, "a", None);
    page.with_class(hero_button, "btn");
    page.with_attr(hero_button, "href", "#contato");

    let target = page.insert(body, "section", Some("servicos"));
    page.with_class(target, "section");
    page.set_geometry(target, 1_000.0, 600.0);
    let contact = page.insert(body, "section", Some("contato"));
    page.with_class(contact, "section");
    page.set_geometry(contact, 2_000.0, 600.0);

    let back_to_top = page.insert(body, "button", Some("backToTop"));

    Landing {
        effects,
        header,
        menu,
        toggle,
        close,
        link,
        hero_button,
        back_to_top,
        sections: vec![target, contact],
        target,
    }
}

fn controller(landing: &Landing) -> Rc<NavController<MockEffects>> {
    let bindings = PageBindings {
        header: Some(landing.header),
        nav_menu: Some(landing.menu),
        nav_toggle: Some(landing.toggle),
        nav_close: Some(landing.close),
        nav_links: vec![landing.link],
        hero_buttons: vec![landing.hero_button],
        back_to_top: Some(landing.back_to_top),
        sections: landing.sections.clone(),
    };
    let nav = Rc::new(NavController::new(
        landing.effects.clone(),
        Rc::new(SiteConfig::default()),
        bindings,
    ));
    nav.init().expect("init should succeed");
    nav
}

fn click_on(target: NodeId) -> EventContext<NodeId> {
    EventContext::on(target)
}

#[test]
fn toggle_twice_returns_to_closed() {
    let landing = landing_page();
    let nav = controller(&landing);
    let page = &landing.effects.page;
    let body = page.body_id();

    assert!(nav.toggle_mobile_menu().unwrap());
    assert!(page.has_class(&landing.menu, SHOW_MENU_CLASS));
    assert!(page.has_class(&body, NO_SCROLL_CLASS));

    assert!(!nav.toggle_mobile_menu().unwrap());
    assert!(!page.has_class(&landing.menu, SHOW_MENU_CLASS));
    assert!(!page.has_class(&body, NO_SCROLL_CLASS));
}

#[test]
fn close_is_idempotent() {
    let landing = landing_page();
    let nav = controller(&landing);

    nav.toggle_mobile_menu().unwrap();
    nav.close_mobile_menu().unwrap();
    nav.close_mobile_menu().unwrap();
    assert!(!nav.is_menu_open());
    assert!(!landing
        .effects
        .page
        .has_class(&landing.effects.page.body_id(), NO_SCROLL_CLASS));
}

#[test]
fn keyboard_activation_toggles_and_prevents_default() {
    let landing = landing_page();
    let nav = controller(&landing);

    let dispatch = nav.dispatch(&NavAction::ToggleMenuKey, &EventContext::key("Enter"));
    assert_eq!(dispatch, Dispatch::prevent());
    assert!(nav.is_menu_open());

    let dispatch = nav.dispatch(&NavAction::ToggleMenuKey, &EventContext::key("Tab"));
    assert_eq!(dispatch, Dispatch::proceed());
    assert!(nav.is_menu_open());

    nav.dispatch(&NavAction::ToggleMenuKey, &EventContext::key(" "));
    assert!(!nav.is_menu_open());
}

#[test]
fn outside_click_closes_but_inside_click_does_not() {
    let landing = landing_page();
    let nav = controller(&landing);

    nav.toggle_mobile_menu().unwrap();
    nav.dispatch(&NavAction::DocumentClick, &click_on(landing.close));
    assert!(nav.is_menu_open());
    nav.dispatch(&NavAction::DocumentClick, &click_on(landing.toggle));
    assert!(nav.is_menu_open());

    nav.dispatch(&NavAction::DocumentClick, &click_on(landing.target));
    assert!(!nav.is_menu_open());
}

#[test]
fn document_click_on_fragment_link_prevents_default() {
    let landing = landing_page();
    let nav = controller(&landing);

    assert_eq!(
        nav.dispatch(&NavAction::DocumentClick, &click_on(landing.hero_button)),
        Dispatch::prevent()
    );
    assert_eq!(
        nav.dispatch(&NavAction::DocumentClick, &click_on(landing.back_to_top)),
        Dispatch::proceed()
    );
}

#[test]
fn header_state_follows_scroll_and_is_idempotent() {
    let landing = landing_page();
    let nav = controller(&landing);
    let page = &landing.effects.page;

    page.set_scroll_y(150.0);
    nav.apply_header_state().unwrap();
    nav.apply_header_state().unwrap();
    assert_eq!(page.classes(landing.header), vec![SCROLLED_CLASS]);

    page.set_scroll_y(50.0);
    nav.apply_header_state().unwrap();
    assert!(!page.has_class(&landing.header, SCROLLED_CLASS));
}

#[tokio::test]
async fn debounced_header_scroll_applies_after_wait() {
    let landing = landing_page();
    let nav = controller(&landing);
    let page = &landing.effects.page;

    page.set_scroll_y(150.0);
    nav.dispatch(&NavAction::HeaderScroll, &EventContext::default());
    assert!(!page.has_class(&landing.header, SCROLLED_CLASS));

    landing.effects.tasks.run_until_idle().await;
    assert!(page.has_class(&landing.header, SCROLLED_CLASS));
    assert_eq!(landing.effects.time.sleeps(), vec![10]);
}

#[test]
fn back_to_top_visibility_follows_scroll() {
    let landing = landing_page();
    let nav = controller(&landing);
    let page = &landing.effects.page;

    page.set_scroll_y(301.0);
    nav.dispatch(&NavAction::Scroll, &EventContext::default());
    assert!(page.has_class(&landing.back_to_top, VISIBLE_CLASS));

    page.set_scroll_y(300.0);
    nav.dispatch(&NavAction::Scroll, &EventContext::default());
    assert!(!page.has_class(&landing.back_to_top, VISIBLE_CLASS));
}

#[test]
fn smooth_scroll_leaves_room_for_header() {
    let landing = landing_page();
    let nav = controller(&landing);

    assert_eq!(nav.smooth_scroll_to("servicos"), Some(900.0));
    assert_eq!(
        landing.effects.page.scroll_history(),
        vec![(900.0, ScrollBehavior::Smooth)]
    );
}

#[test]
fn smooth_scroll_falls_back_to_instant() {
    let landing = landing_page();
    let nav = controller(&landing);
    landing.effects.page.set_smooth_scroll_supported(false);

    nav.smooth_scroll_to("contato");
    nav.scroll_to_top();
    assert_eq!(
        landing.effects.page.scroll_history(),
        vec![(1_900.0, ScrollBehavior::Instant), (0.0, ScrollBehavior::Instant)]
    );
}

#[test]
fn missing_anchor_target_does_not_scroll() {
    let landing = landing_page();
    let nav = controller(&landing);

    assert_eq!(nav.smooth_scroll_to("nowhere"), None);
    assert!(landing.effects.page.scroll_history().is_empty());
}

#[test]
fn anchor_links_scroll_and_prevent_default() {
    let landing = landing_page();
    let nav = controller(&landing);

    let dispatch = nav.dispatch(
        &NavAction::FollowAnchor(landing.hero_button),
        &click_on(landing.hero_button),
    );
    assert_eq!(dispatch, Dispatch::prevent());
    assert_eq!(landing.effects.page.scroll_y(), 1_900.0);
}

#[test]
fn back_to_top_key_scrolls_home() {
    let landing = landing_page();
    let nav = controller(&landing);
    landing.effects.page.set_scroll_y(800.0);

    let dispatch = nav.dispatch(&NavAction::BackToTopKey, &EventContext::key("Enter"));
    assert_eq!(dispatch, Dispatch::prevent());
    assert_eq!(landing.effects.page.scroll_y(), 0.0);
}

#[test]
fn sections_fade_in_once() {
    let landing = landing_page();
    let nav = controller(&landing);
    let section = landing.sections[0];

    assert!(!nav.on_intersection(&section, false).unwrap());
    assert!(nav.on_intersection(&section, true).unwrap());
    assert!(!nav.on_intersection(&section, true).unwrap());
    assert!(nav.is_revealed(&section));
    assert_eq!(
        landing
            .effects
            .page
            .classes(section)
            .iter()
            .filter(|class| *class == FADE_IN_CLASS)
            .count(),
        1
    );
}

#[test]
fn registrations_cover_page_wiring() {
    let landing = landing_page();
    let nav = controller(&landing);
    let registrations = nav.registrations();

    let on_link: Vec<_> = registrations
        .iter()
        .filter(|r| r.target == ListenerTarget::Element(landing.link))
        .map(|r| r.action.clone())
        .collect();
    assert_eq!(
        on_link,
        vec![NavAction::CloseMenu, NavAction::FollowAnchor(landing.link)]
    );

    let scroll_actions: Vec<_> = registrations
        .iter()
        .filter(|r| r.target == ListenerTarget::Window && r.event == EventKind::Scroll)
        .map(|r| r.action.clone())
        .collect();
    assert_eq!(scroll_actions, vec![NavAction::HeaderScroll, NavAction::Scroll]);

    assert!(registrations
        .iter()
        .any(|r| r.target == ListenerTarget::Document && r.action == NavAction::DocumentClick));
}

#[test]
fn missing_elements_skip_wiring() {
    let effects = MockEffects::new();
    let nav = Rc::new(NavController::new(
        effects.clone(),
        Rc::new(SiteConfig::default()),
        PageBindings::default(),
    ));
    nav.init().unwrap();

    assert!(!nav.toggle_mobile_menu().unwrap());
    assert_eq!(nav.registrations().len(), 1);
    assert_eq!(
        nav.dispatch(&NavAction::DocumentClick, &EventContext::default()),
        Dispatch::proceed()
    );
}
