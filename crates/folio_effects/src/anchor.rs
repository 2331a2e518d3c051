//! Smooth anchor scrolling
//!
//! Same-page links (`href="#..."`) scroll smoothly to their target instead of
//! jumping, leaving room for the fixed header. The default jump is always
//! suppressed, even when the target does not exist.

use folio_core::{EffectsConfig, Query, ScrollBehavior, ViewBinding};

/// What a click handler asks the host to do with the native event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOutcome {
    /// Some behavior reacted to the click
    pub handled: bool,
    /// The host must cancel the browser's default action
    pub prevent_default: bool,
}

impl ClickOutcome {
    pub const IGNORED: ClickOutcome = ClickOutcome {
        handled: false,
        prevent_default: false,
    };

    pub fn handled() -> Self {
        Self {
            handled: true,
            prevent_default: false,
        }
    }

    pub fn prevented() -> Self {
        Self {
            handled: true,
            prevent_default: true,
        }
    }

    /// Combine the outcomes of two handlers of the same click
    pub fn merge(self, other: ClickOutcome) -> Self {
        Self {
            handled: self.handled || other.handled,
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

/// Intercepts same-page anchor clicks
#[derive(Debug, Clone)]
pub struct AnchorScroller<H> {
    links: Vec<H>,
    header_offset: f64,
}

impl<H: Clone + PartialEq> AnchorScroller<H> {
    pub fn bind<V>(view: &V, config: &EffectsConfig) -> Self
    where
        V: ViewBinding<Handle = H>,
    {
        Self {
            links: view.query_all(&Query::anchor_links()),
            header_offset: config.anchor.header_offset,
        }
    }

    pub fn links(&self) -> &[H] {
        &self.links
    }

    /// Scroll offset that brings `target` just below the fixed header
    pub fn destination<V>(&self, view: &V, target: &H) -> Option<f64>
    where
        V: ViewBinding<Handle = H>,
    {
        let rect = view.bounding_rect(target)?;
        Some(rect.top + view.scroll_y() - self.header_offset)
    }

    pub fn on_click<V>(&self, view: &mut V, link: &H) -> ClickOutcome
    where
        V: ViewBinding<Handle = H>,
    {
        if !self.links.contains(link) {
            return ClickOutcome::IGNORED;
        }

        let href = view.attribute(link, "href").unwrap_or_default();
        let target = href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .and_then(|id| view.element_by_id(id));

        match target.and_then(|t| self.destination(view, &t)) {
            Some(top) => {
                tracing::debug!(%href, top, "smooth scrolling to anchor");
                view.scroll_to(top, ScrollBehavior::Smooth);
            }
            None => tracing::debug!(%href, "anchor target not found"),
        }

        ClickOutcome::prevented()
    }
}
