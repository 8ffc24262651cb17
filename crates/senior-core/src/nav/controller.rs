//! Navigation and scroll controller

use super::reveal::{RevealStep, RevealTracker};
use super::scroll::{anchor_target, back_to_top_visible, fragment, header_is_scrolled};
use crate::bindings::PageBindings;
use crate::config::SiteConfig;
use crate::debounce::Debouncer;
use crate::effects::{ScrollBehavior, SiteEffects};
use crate::error::SiteResult;
use crate::events::{Dispatch, EventContext, EventKind, Registration};
use std::rc::Rc;

pub const SHOW_MENU_CLASS: &str = "show-menu";
pub const NO_SCROLL_CLASS: &str = "no-scroll";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "visible";
pub const FADE_IN_CLASS: &str = "fade-in";

/// Features reported in the start-up log.
pub const FEATURES: [&str; 6] = [
    "Navegação mobile responsiva",
    "Header com efeito de scroll",
    "Navegação suave por âncoras",
    "Validação de formulário",
    "Botão \"Voltar ao topo\"",
    "Animações de fade-in nas seções",
];

/// Actions the navigation controller listens for.
#[derive(Clone, Debug, PartialEq)]
pub enum NavAction<E> {
    /// Click on the menu toggle.
    ToggleMenu,
    /// Key press on the menu toggle.
    ToggleMenuKey,
    /// Click on the close button or on a nav link.
    CloseMenu,
    /// Click on an in-page link (nav link or hero button).
    FollowAnchor(E),
    /// Any click on the document.
    DocumentClick,
    /// Window scroll, undebounced (back-to-top visibility).
    Scroll,
    /// Window scroll, debounced (header state).
    HeaderScroll,
    BackToTop,
    BackToTopKey,
}

/// Mobile menu, header state, back-to-top button, anchor scrolling and
/// section reveal for the landing page.
pub struct NavController<E: SiteEffects> {
    effects: E,
    config: Rc<SiteConfig>,
    bindings: PageBindings<E::Element>,
    debouncer: Debouncer,
    reveal: RevealTracker<E::Element>,
}

impl<E: SiteEffects> NavController<E> {
    pub fn new(effects: E, config: Rc<SiteConfig>, bindings: PageBindings<E::Element>) -> Self {
        Self {
            debouncer: Debouncer::new(config.scroll_debounce_ms),
            reveal: RevealTracker::new(),
            effects,
            config,
            bindings,
        }
    }

    pub fn bindings(&self) -> &PageBindings<E::Element> {
        &self.bindings
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Listener wiring. Entries for elements the page lacks are omitted.
    pub fn registrations(&self) -> Vec<Registration<E::Element, NavAction<E::Element>>> {
        let b = &self.bindings;
        let mut list = Vec::new();

        if let Some(toggle) = &b.nav_toggle {
            list.push(Registration::element(
                toggle.clone(),
                EventKind::Click,
                NavAction::ToggleMenu,
            ));
            list.push(Registration::element(
                toggle.clone(),
                EventKind::KeyDown,
                NavAction::ToggleMenuKey,
            ));
        }
        if let Some(close) = &b.nav_close {
            list.push(Registration::element(
                close.clone(),
                EventKind::Click,
                NavAction::CloseMenu,
            ));
        }
        for link in &b.nav_links {
            list.push(Registration::element(
                link.clone(),
                EventKind::Click,
                NavAction::CloseMenu,
            ));
            list.push(Registration::element(
                link.clone(),
                EventKind::Click,
                NavAction::FollowAnchor(link.clone()),
            ));
        }
        for button in &b.hero_buttons {
            list.push(Registration::element(
                button.clone(),
                EventKind::Click,
                NavAction::FollowAnchor(button.clone()),
            ));
        }
        list.push(Registration::document(EventKind::Click, NavAction::DocumentClick));

        if b.header.is_some() {
            list.push(Registration::window(EventKind::Scroll, NavAction::HeaderScroll));
        }
        if let Some(button) = &b.back_to_top {
            list.push(Registration::window(EventKind::Scroll, NavAction::Scroll));
            list.push(Registration::element(
                button.clone(),
                EventKind::Click,
                NavAction::BackToTop,
            ));
            list.push(Registration::element(
                button.clone(),
                EventKind::KeyDown,
                NavAction::BackToTopKey,
            ));
        }

        list
    }

    /// Handle a listener firing.
    pub fn dispatch(
        self: &Rc<Self>,
        action: &NavAction<E::Element>,
        event: &EventContext<E::Element>,
    ) -> Dispatch {
        let result = match action {
            NavAction::ToggleMenu => self.toggle_mobile_menu().map(|_| Dispatch::proceed()),
            NavAction::ToggleMenuKey if event.is_activation_key() => {
                self.toggle_mobile_menu().map(|_| Dispatch::prevent())
            }
            NavAction::CloseMenu => self.close_mobile_menu().map(|()| Dispatch::proceed()),
            NavAction::FollowAnchor(link) => {
                self.follow_anchor(link);
                Ok(Dispatch::prevent())
            }
            NavAction::DocumentClick => self.document_click(event),
            NavAction::Scroll => self.apply_back_to_top_state().map(|()| Dispatch::proceed()),
            NavAction::HeaderScroll => {
                let controller = Rc::clone(self);
                self.effects.spawn_local(Box::pin(async move {
                    controller.header_scrolled().await;
                }));
                Ok(Dispatch::proceed())
            }
            NavAction::BackToTop => {
                self.scroll_to_top();
                Ok(Dispatch::proceed())
            }
            NavAction::BackToTopKey if event.is_activation_key() => {
                self.scroll_to_top();
                Ok(Dispatch::prevent())
            }
            NavAction::ToggleMenuKey | NavAction::BackToTopKey => Ok(Dispatch::proceed()),
        };

        result.unwrap_or_else(|err| {
            tracing::debug!(target: "senior::nav", "{:?} failed: {}", action, err);
            Dispatch::proceed()
        })
    }

    // ------------------------------------------------------------------
    // Mobile menu
    // ------------------------------------------------------------------

    /// Toggle the menu and the body scroll lock. Returns whether the menu is
    /// now open.
    pub fn toggle_mobile_menu(&self) -> SiteResult<bool> {
        let Some(menu) = &self.bindings.nav_menu else {
            return Ok(false);
        };
        let open = self.effects.toggle_class(menu, SHOW_MENU_CLASS)?;
        let body = self.effects.body()?;
        if open {
            self.effects.add_class(&body, NO_SCROLL_CLASS)?;
        } else {
            self.effects.remove_class(&body, NO_SCROLL_CLASS)?;
        }
        Ok(open)
    }

    pub fn close_mobile_menu(&self) -> SiteResult<()> {
        if let Some(menu) = &self.bindings.nav_menu {
            self.effects.remove_class(menu, SHOW_MENU_CLASS)?;
        }
        let body = self.effects.body()?;
        self.effects.remove_class(&body, NO_SCROLL_CLASS)
    }

    pub fn is_menu_open(&self) -> bool {
        self.bindings
            .nav_menu
            .as_ref()
            .is_some_and(|menu| self.effects.has_class(menu, SHOW_MENU_CLASS))
    }

    /// Close on clicks outside the menu and its toggle; suppress the default
    /// jump of `#` links.
    fn document_click(&self, event: &EventContext<E::Element>) -> SiteResult<Dispatch> {
        if let Some(menu) = &self.bindings.nav_menu {
            let inside = event.target.as_ref().is_some_and(|target| {
                self.effects.contains(menu, target)
                    || self
                        .bindings
                        .nav_toggle
                        .as_ref()
                        .is_some_and(|toggle| self.effects.contains(toggle, target))
            });
            if !inside {
                self.close_mobile_menu()?;
            }
        }

        let in_page_link = event.target.as_ref().is_some_and(|target| {
            self.effects.tag_name(target) == "a"
                && self
                    .effects
                    .attribute(target, "href")
                    .is_some_and(|href| href.starts_with('#'))
        });
        Ok(if in_page_link {
            Dispatch::prevent()
        } else {
            Dispatch::proceed()
        })
    }

    // ------------------------------------------------------------------
    // Scroll state
    // ------------------------------------------------------------------

    /// Set or clear the header's scrolled state from the current offset.
    pub fn apply_header_state(&self) -> SiteResult<()> {
        let Some(header) = &self.bindings.header else {
            return Ok(());
        };
        if header_is_scrolled(self.effects.scroll_y(), &self.config) {
            self.effects.add_class(header, SCROLLED_CLASS)
        } else {
            self.effects.remove_class(header, SCROLLED_CLASS)
        }
    }

    pub fn apply_back_to_top_state(&self) -> SiteResult<()> {
        let Some(button) = &self.bindings.back_to_top else {
            return Ok(());
        };
        if back_to_top_visible(self.effects.scroll_y(), &self.config) {
            self.effects.add_class(button, VISIBLE_CLASS)
        } else {
            self.effects.remove_class(button, VISIBLE_CLASS)
        }
    }

    /// Debounced header update: only the last call of a burst applies.
    pub async fn header_scrolled(&self) {
        if self.debouncer.settle(&self.effects).await {
            if let Err(err) = self.apply_header_state() {
                tracing::debug!(target: "senior::nav", "header update failed: {}", err);
            }
        }
    }

    // ------------------------------------------------------------------
    // Anchor scrolling
    // ------------------------------------------------------------------

    /// Scroll so the element with `id` sits just below the header.
    ///
    /// Returns the offset scrolled to, or `None` if no such element exists.
    pub fn smooth_scroll_to(&self, id: &str) -> Option<f64> {
        let Some(target) = self.effects.element_by_id(id) else {
            tracing::warn!(target: "senior::nav", "Elemento com ID '{}' não encontrado", id);
            return None;
        };
        let header_height = self
            .bindings
            .header
            .as_ref()
            .map_or(0.0, |header| self.effects.offset_height(header));
        let top = anchor_target(self.effects.offset_top(&target), header_height, &self.config);

        self.effects.scroll_to(top, self.behavior());
        tracing::info!(target: "senior::nav", "Navegando para: {}, posição: {}", id, top);
        Some(top)
    }

    pub fn scroll_to_top(&self) {
        self.effects.scroll_to(0.0, self.behavior());
    }

    /// Follow an in-page link. Links that are not `#fragment`s are left alone.
    pub fn follow_anchor(&self, link: &E::Element) -> Option<f64> {
        let href = self.effects.attribute(link, "href")?;
        fragment(&href).and_then(|id| self.smooth_scroll_to(id))
    }

    fn behavior(&self) -> ScrollBehavior {
        if self.effects.supports_smooth_scroll() {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }

    // ------------------------------------------------------------------
    // Section reveal
    // ------------------------------------------------------------------

    /// Sections to hand to the intersection observer.
    pub fn reveal_targets(&self) -> &[E::Element] {
        &self.bindings.sections
    }

    /// Handle one intersection report. Returns `true` when the observer
    /// should stop watching `section`.
    pub fn on_intersection(&self, section: &E::Element, is_intersecting: bool) -> SiteResult<bool> {
        match self.reveal.on_entry(section, is_intersecting) {
            RevealStep::Reveal => {
                self.effects.add_class(section, FADE_IN_CLASS)?;
                Ok(true)
            }
            RevealStep::Ignore => Ok(false),
        }
    }

    pub fn is_revealed(&self, section: &E::Element) -> bool {
        self.effects.has_class(section, FADE_IN_CLASS) && !self.reveal.is_observed(section)
    }

    // ------------------------------------------------------------------
    // Start-up
    // ------------------------------------------------------------------

    /// Observe sections, apply the initial header state and log the feature
    /// list.
    pub fn init(&self) -> SiteResult<()> {
        self.reveal.observe(&self.bindings.sections);
        self.apply_header_state()?;

        tracing::info!(target: "senior::nav", "Senior Expert - Aplicação inicializada com sucesso!");
        for feature in FEATURES {
            tracing::info!(target: "senior::nav", "- {}", feature);
        }
        tracing::debug!(
            target: "senior::nav",
            sections = self.bindings.sections.len(),
            nav_links = self.bindings.nav_links.len(),
            "navigation wired"
        );
        Ok(())
    }
}
