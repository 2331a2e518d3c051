//! Navigation behaviors
//!
//! - [`MobileNavToggle`] opens and closes the collapsed mobile menu.
//! - [`FloatingNavSelector`] keeps exactly one floating navigation button
//!   active. Selection is cosmetic: it is logged and recorded, nothing else
//!   on the page switches.

use folio_core::{EffectsConfig, Query, ViewBinding};

/// Opens/closes the mobile menu
#[derive(Debug, Clone)]
pub struct MobileNavToggle<H> {
    toggle: Option<H>,
    menu: Option<H>,
    links: Vec<H>,
    flag: String,
}

impl<H: Clone + PartialEq> MobileNavToggle<H> {
    pub fn bind<V>(view: &V, config: &EffectsConfig) -> Self
    where
        V: ViewBinding<Handle = H>,
    {
        let selectors = &config.selectors;
        Self {
            toggle: view.element_by_id(&selectors.nav_toggle_id),
            menu: view.element_by_id(&selectors.nav_menu_id),
            links: view.query_all(&Query::class(&selectors.nav_link_class)),
            flag: config.flags.active.clone(),
        }
    }

    /// Elements this behavior listens to
    pub fn click_targets(&self) -> impl Iterator<Item = &H> {
        self.toggle.iter().chain(self.links.iter())
    }

    pub fn links(&self) -> &[H] {
        &self.links
    }

    /// Whether the menu is currently open
    pub fn is_open<V>(&self, view: &V) -> bool
    where
        V: ViewBinding<Handle = H>,
    {
        self.menu
            .as_ref()
            .or(self.toggle.as_ref())
            .is_some_and(|el| view.has_class(el, &self.flag))
    }

    /// Handle a click; returns whether `target` belongs to this behavior
    pub fn on_click<V>(&self, view: &mut V, target: &H) -> bool
    where
        V: ViewBinding<Handle = H>,
    {
        if self.toggle.as_ref() == Some(target) {
            for el in self.toggle.iter().chain(self.menu.iter()) {
                view.toggle_class(el, &self.flag);
            }
            tracing::debug!(open = self.is_open(view), "mobile nav toggled");
            return true;
        }

        if self.links.contains(target) {
            for el in self.toggle.iter().chain(self.menu.iter()) {
                view.remove_class(el, &self.flag);
            }
            return true;
        }

        false
    }
}

/// Single-selection floating navigation
#[derive(Debug, Clone)]
pub struct FloatingNavSelector<H> {
    buttons: Vec<H>,
    flag: String,
    tab_attribute: String,
    selected: Option<String>,
}

impl<H: Clone + PartialEq> FloatingNavSelector<H> {
    pub fn bind<V>(view: &V, config: &EffectsConfig) -> Self
    where
        V: ViewBinding<Handle = H>,
    {
        Self {
            buttons: view.query_all(&Query::class(&config.selectors.floating_button_class)),
            flag: config.flags.active.clone(),
            tab_attribute: config.selectors.tab_attribute.clone(),
            selected: None,
        }
    }

    pub fn buttons(&self) -> &[H] {
        &self.buttons
    }

    /// Tab of the last selected button
    pub fn selected_tab(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Handle a click; returns whether `target` is one of the buttons
    pub fn on_click<V>(&mut self, view: &mut V, target: &H) -> bool
    where
        V: ViewBinding<Handle = H>,
    {
        if !self.buttons.contains(target) {
            return false;
        }

        for button in &self.buttons {
            view.remove_class(button, &self.flag);
        }
        view.add_class(target, &self.flag);

        self.selected = view.attribute(target, &self.tab_attribute);
        tracing::info!(tab = self.selected.as_deref().unwrap_or("undefined"), "switched floating tab");
        true
    }
}
