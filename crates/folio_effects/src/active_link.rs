//! Active navigation link highlighting
//!
//! On scroll, the section under a probe line (scroll offset plus a fixed
//! probe offset) decides which navigation link is active. Sections are walked
//! in document order and every match rewrites the flags, so when extents
//! overlap the last matching section wins; when none match the flags are left
//! as they were.

use folio_core::{EffectsConfig, Query, ViewBinding};

#[derive(Debug, Clone)]
pub struct ActiveLinkHighlighter<H> {
    links: Vec<H>,
    sections: Query,
    probe_offset: f64,
    flag: String,
}

impl<H: Clone + PartialEq> ActiveLinkHighlighter<H> {
    pub fn bind<V>(view: &V, config: &EffectsConfig) -> Self
    where
        V: ViewBinding<Handle = H>,
    {
        Self {
            links: view.query_all(&Query::class(&config.selectors.nav_link_class)),
            sections: Query::identified(&config.selectors.section_tag),
            probe_offset: config.active_link.probe_offset,
            flag: config.flags.active.clone(),
        }
    }

    /// Update link flags; returns the id of the section that set them, if any
    pub fn on_scroll<V>(&self, view: &mut V) -> Option<String>
    where
        V: ViewBinding<Handle = H>,
    {
        let probe = view.scroll_y() + self.probe_offset;
        let mut current = None;

        for section in view.query_all(&self.sections) {
            let (Some(rect), Some(id)) = (view.offset_rect(&section), view.attribute(&section, "id"))
            else {
                continue;
            };
            if !rect.contains(probe) {
                continue;
            }

            let href = format!("#{id}");
            for link in &self.links {
                view.remove_class(link, &self.flag);
                if view.attribute(link, "href").as_deref() == Some(href.as_str()) {
                    view.add_class(link, &self.flag);
                }
            }
            current = Some(id);
        }

        current
    }
}
