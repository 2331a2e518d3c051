//! Visibility-triggered reveal
//!
//! Elements registered here fade in the first time they scroll into view.
//! Each element fires once: after its first visible entry it is dropped from
//! observation, later entries for it are ignored, and it is never observed
//! again, not even when the page is registered anew after a restart.
//!
//! The statistics container is special: when it is revealed, every counter
//! element inside it is reported back with its parsed target so the
//! controller can start counting.
//!
//! # Entry sources
//!
//! Browsers deliver [`IntersectionEntry`] batches from a native observer.
//! Hosts without one call [`VisibilityAnimator::sample`], which derives
//! entries from element geometry and the viewport. Both sources report raw
//! overlap in `is_intersecting`; the threshold is applied in
//! [`VisibilityAnimator::handle_entries`] so they reveal at the same ratio.

use std::time::Duration;

use folio_animation::parse_count;
use folio_core::{EffectsConfig, Query, ViewBinding, TRANSITION_DELAY};

/// One observation of an element's visibility
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<H> {
    pub target: H,
    /// Visible fraction of the element, 0.0 to 1.0
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// An element revealed by an entry batch
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal<H> {
    pub element: H,
    /// Counter elements to animate, with their targets
    pub counters: Vec<(H, i64)>,
}

/// Fire-once visibility observer
#[derive(Debug, Clone)]
pub struct VisibilityAnimator<H> {
    observed: Vec<H>,
    revealed: Vec<H>,
    threshold: f64,
    root_margin: f64,
    visible_flag: String,
    fade_in_flag: String,
    section_query: Query,
    stats_class: String,
    stat_value_query: Query,
    card_query: Query,
    count_attribute: String,
    card_stagger: Duration,
}

impl<H: Clone + PartialEq> VisibilityAnimator<H> {
    pub fn new(config: &EffectsConfig) -> Self {
        let selectors = &config.selectors;
        Self {
            observed: Vec::new(),
            revealed: Vec::new(),
            threshold: config.visibility.threshold,
            root_margin: config.visibility.root_margin,
            visible_flag: config.flags.visible.clone(),
            fade_in_flag: config.flags.fade_in.clone(),
            section_query: Query::class(&selectors.section_class),
            stats_class: selectors.stats_class.clone(),
            stat_value_query: Query::class(&selectors.stat_value_class),
            card_query: Query::AnyClass(selectors.card_classes.clone()),
            count_attribute: selectors.count_attribute.clone(),
            card_stagger: Duration::from_millis(config.visibility.card_stagger_ms),
        }
    }

    /// Elements still waiting for their first reveal
    pub fn observed(&self) -> &[H] {
        &self.observed
    }

    pub fn is_observed(&self, element: &H) -> bool {
        self.observed.contains(element)
    }

    pub fn is_revealed(&self, element: &H) -> bool {
        self.revealed.contains(element)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching an element
    ///
    /// Observing twice, or observing an element that was already revealed,
    /// is a no-op.
    pub fn observe(&mut self, element: H) {
        if !self.observed.contains(&element) && !self.revealed.contains(&element) {
            self.observed.push(element);
        }
    }

    pub fn unobserve(&mut self, element: &H) {
        self.observed.retain(|e| e != element);
    }

    /// Stop watching everything; revealed elements stay revealed
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    /// Prepare and observe the page's animated elements
    ///
    /// Sections and cards get the fade-in flag; cards also get a transition
    /// delay that grows with their position so they cascade in. The first
    /// statistics container is observed for its counters.
    pub fn register_page<V>(&mut self, view: &mut V)
    where
        V: ViewBinding<Handle = H>,
    {
        for section in view.query_all(&self.section_query) {
            view.add_class(&section, &self.fade_in_flag);
            self.observe(section);
        }

        if let Some(stats) = view.query_first(&Query::class(&self.stats_class)) {
            self.observe(stats);
        }

        for (index, card) in view.query_all(&self.card_query).into_iter().enumerate() {
            view.add_class(&card, &self.fade_in_flag);
            let delay = self.card_stagger * index as u32;
            view.set_style(&card, TRANSITION_DELAY, &format!("{}s", delay.as_secs_f64()));
            self.observe(card);
        }

        tracing::debug!(observed = self.observed.len(), "registered reveal targets");
    }

    /// Derive entries for every observed element from current geometry
    ///
    /// `is_intersecting` means any overlap with the viewport, as a native
    /// observer reports it. Entries below the threshold are dropped later by
    /// [`handle_entries`](Self::handle_entries).
    pub fn sample<V>(&self, view: &V) -> Vec<IntersectionEntry<H>>
    where
        V: ViewBinding<Handle = H>,
    {
        let root_top = -self.root_margin;
        let root_bottom = view.viewport_height() + self.root_margin;

        self.observed
            .iter()
            .filter_map(|element| {
                let rect = view.bounding_rect(element)?;
                let overlap = rect.bottom().min(root_bottom) - rect.top.max(root_top);
                let overlaps = if rect.height > 0.0 {
                    overlap > 0.0
                } else {
                    rect.top >= root_top && rect.top <= root_bottom
                };
                let ratio = if !overlaps {
                    0.0
                } else if rect.height > 0.0 {
                    (overlap / rect.height).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                Some(IntersectionEntry {
                    target: element.clone(),
                    ratio,
                    is_intersecting: overlaps,
                })
            })
            .collect()
    }

    /// Apply an entry batch, returning the elements revealed by it
    ///
    /// An entry reveals its target when it intersects with at least the
    /// threshold ratio.
    pub fn handle_entries<V>(
        &mut self,
        view: &mut V,
        entries: &[IntersectionEntry<H>],
    ) -> Vec<Reveal<H>>
    where
        V: ViewBinding<Handle = H>,
    {
        let mut reveals = Vec::new();

        for entry in entries {
            if !entry.is_intersecting
                || entry.ratio < self.threshold
                || !self.is_observed(&entry.target)
            {
                continue;
            }

            view.add_class(&entry.target, &self.visible_flag);

            let counters = if view.has_class(&entry.target, &self.stats_class) {
                self.counters_in(view, &entry.target)
            } else {
                Vec::new()
            };

            self.unobserve(&entry.target);
            self.revealed.push(entry.target.clone());
            tracing::debug!(ratio = entry.ratio, counters = counters.len(), "element revealed");

            reveals.push(Reveal {
                element: entry.target.clone(),
                counters,
            });
        }

        reveals
    }

    fn counters_in<V>(&self, view: &V, stats: &H) -> Vec<(H, i64)>
    where
        V: ViewBinding<Handle = H>,
    {
        view.query_within(stats, &self.stat_value_query)
            .into_iter()
            .filter_map(|counter| {
                let raw = view.attribute(&counter, &self.count_attribute);
                match raw.as_deref().and_then(parse_count) {
                    Some(target) => Some((counter, target)),
                    None => {
                        tracing::warn!(value = ?raw, "skipping counter without a numeric target");
                        None
                    }
                }
            })
            .collect()
    }
}
