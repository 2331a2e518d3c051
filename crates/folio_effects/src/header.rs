//! Header scroll reactor
//!
//! Flags the page header once the window has scrolled past a threshold, so
//! the stylesheet can switch it to its compact look.

use folio_core::{EffectsConfig, ViewBinding};

/// Toggles the `scrolled` flag on the header
#[derive(Debug, Clone)]
pub struct HeaderScrollReactor<H> {
    header: Option<H>,
    threshold: f64,
    flag: String,
    scrolled: bool,
}

impl<H: Clone + PartialEq> HeaderScrollReactor<H> {
    pub fn bind<V>(view: &V, config: &EffectsConfig) -> Self
    where
        V: ViewBinding<Handle = H>,
    {
        Self {
            header: view.element_by_id(&config.selectors.header_id),
            threshold: config.header.scrolled_threshold,
            flag: config.flags.scrolled.clone(),
            scrolled: false,
        }
    }

    /// Whether the last scroll put the header in its scrolled state
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn on_scroll<V>(&mut self, view: &mut V)
    where
        V: ViewBinding<Handle = H>,
    {
        let Some(header) = &self.header else {
            return;
        };

        let scrolled = view.scroll_y() > self.threshold;
        if scrolled {
            view.add_class(header, &self.flag);
        } else {
            view.remove_class(header, &self.flag);
        }

        if scrolled != self.scrolled {
            tracing::debug!(scrolled, scroll_y = view.scroll_y(), "header state changed");
            self.scrolled = scrolled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::memory::{ElementSpec, MemoryDocument};

    #[test]
    fn test_threshold_is_strict() {
        let mut doc = MemoryDocument::new(800.0);
        let header = doc.append(ElementSpec::new("header").id("header"));
        let mut reactor = HeaderScrollReactor::bind(&doc, &EffectsConfig::default());

        for (offset, expected) in [(0.0, false), (50.0, false), (50.5, true), (900.0, true), (12.0, false)] {
            doc.set_scroll_y(offset);
            reactor.on_scroll(&mut doc);
            assert_eq!(doc.has_class(&header, "scrolled"), expected, "offset {offset}");
            assert_eq!(reactor.is_scrolled(), expected);
        }
    }

    #[test]
    fn test_missing_header_is_ignored() {
        let mut doc = MemoryDocument::new(800.0);
        let mut reactor = HeaderScrollReactor::bind(&doc, &EffectsConfig::default());
        doc.set_scroll_y(400.0);
        reactor.on_scroll(&mut doc);
        assert!(!reactor.is_scrolled());
    }
}
