//! Effects controller
//!
//! [`EffectsController`] owns every page behavior together with the typing
//! cursor, the running counters, and the timer queue that drives them. One
//! controller lives for one page session.
//!
//! # Driving the controller
//!
//! The host forwards page events and advances time:
//!
//! ```text
//! window scroll         → on_scroll()
//! element click         → on_click(element)   (honor prevent_default)
//! intersection batch    → on_intersection(entries)
//!   (or, without a native observer, sample_intersections() after scrolling)
//! timer wake-up         → advance_to(now), then re-arm at next_deadline()
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use folio_core::memory::{ElementSpec, MemoryDocument};
//! use folio_core::EffectsConfig;
//! use folio_effects::EffectsController;
//!
//! let mut doc = MemoryDocument::new(800.0);
//! let headline = doc.append(ElementSpec::new("span").id("typing-text"));
//!
//! let mut controller = EffectsController::new(doc, EffectsConfig::default()).unwrap();
//! controller.start();
//! controller.advance_to(Duration::from_millis(1000));
//! assert_eq!(controller.view().text(headline), "K");
//! ```

use std::time::Duration;

use folio_animation::{CounterAnimation, TimerId, TimerQueue, TypingAnimation};
use folio_core::{EffectsConfig, Result, ViewBinding};
use slotmap::{new_key_type, SlotMap};

use crate::active_link::ActiveLinkHighlighter;
use crate::anchor::{AnchorScroller, ClickOutcome};
use crate::header::HeaderScrollReactor;
use crate::nav::{FloatingNavSelector, MobileNavToggle};
use crate::parallax::ParallaxShifter;
use crate::visibility::{IntersectionEntry, Reveal, VisibilityAnimator};

new_key_type! {
    /// Handle to a running counter animation
    pub struct CounterId;
}

/// Work attached to a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    Typing,
    Counter(CounterId),
}

#[derive(Debug)]
struct RunningCounter<H> {
    element: H,
    animation: CounterAnimation,
}

/// Owner of all page effects for one session
pub struct EffectsController<V: ViewBinding> {
    view: V,
    config: EffectsConfig,

    // Event-driven behaviors
    header: HeaderScrollReactor<V::Handle>,
    mobile_nav: MobileNavToggle<V::Handle>,
    floating_nav: FloatingNavSelector<V::Handle>,
    anchors: AnchorScroller<V::Handle>,
    active_links: ActiveLinkHighlighter<V::Handle>,
    parallax: ParallaxShifter,
    visibility: VisibilityAnimator<V::Handle>,

    // Timer-driven state
    typing: TypingAnimation,
    typing_target: Option<V::Handle>,
    typing_timer: Option<TimerId>,
    counters: SlotMap<CounterId, RunningCounter<V::Handle>>,
    timers: TimerQueue<TimerTask>,

    running: bool,
}

impl<V: ViewBinding> EffectsController<V> {
    /// Bind every behavior to the page
    ///
    /// Elements are looked up once here, except sections and the hero which
    /// are looked up on every scroll. Fails only on an invalid config.
    pub fn new(view: V, config: EffectsConfig) -> Result<Self> {
        config.validate()?;
        let typing = TypingAnimation::from_config(&config.typing)?;

        Ok(Self {
            header: HeaderScrollReactor::bind(&view, &config),
            mobile_nav: MobileNavToggle::bind(&view, &config),
            floating_nav: FloatingNavSelector::bind(&view, &config),
            anchors: AnchorScroller::bind(&view, &config),
            active_links: ActiveLinkHighlighter::bind(&view, &config),
            parallax: ParallaxShifter::new(&config),
            visibility: VisibilityAnimator::new(&config),
            typing,
            typing_target: view.element_by_id(&config.selectors.typing_text_id),
            typing_timer: None,
            counters: SlotMap::with_key(),
            timers: TimerQueue::new(),
            running: false,
            view,
            config,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Run the load-time setup
    ///
    /// Logs the greeting, registers reveal targets, and schedules the first
    /// typing tick after the startup delay if the headline element exists.
    /// Calling `start` on a running controller does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;

        for line in &self.config.greeting.lines {
            tracing::info!("{line}");
        }

        self.visibility.register_page(&mut self.view);

        if self.typing_target.is_some() {
            let delay = self.config.typing.start_delay();
            self.typing_timer = Some(self.timers.schedule(delay, TimerTask::Typing));
        }

        tracing::debug!(
            typing = self.typing_target.is_some(),
            observed = self.visibility.observed().len(),
            "effects started"
        );
    }

    /// Cancel all timers, drop running counters, and stop observing
    ///
    /// Page events are ignored until the next start. Presentation flags
    /// already applied stay in place, and the typing cursor keeps its
    /// position so a later [`start`](Self::start) resumes it.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.timers.clear();
        self.typing_timer = None;
        self.counters.clear();
        self.visibility.disconnect();
        tracing::debug!("effects stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // =========================================================================
    // Page events
    // =========================================================================

    /// Window scrolled: header, active link, then parallax
    pub fn on_scroll(&mut self) {
        if !self.running {
            return;
        }
        self.header.on_scroll(&mut self.view);
        self.active_links.on_scroll(&mut self.view);
        self.parallax.on_scroll(&mut self.view);
    }

    /// Element clicked: nav toggle and links, floating nav, then anchors
    pub fn on_click(&mut self, target: &V::Handle) -> ClickOutcome {
        let mut outcome = ClickOutcome::IGNORED;
        if !self.running {
            return outcome;
        }

        if self.mobile_nav.on_click(&mut self.view, target) {
            outcome = outcome.merge(ClickOutcome::handled());
        }
        if self.floating_nav.on_click(&mut self.view, target) {
            outcome = outcome.merge(ClickOutcome::handled());
        }
        outcome.merge(self.anchors.on_click(&mut self.view, target))
    }

    /// Apply a batch of visibility entries
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry<V::Handle>]) {
        if !self.running {
            return;
        }
        let reveals = self.visibility.handle_entries(&mut self.view, entries);
        for reveal in reveals {
            self.start_counters(reveal);
        }
    }

    /// Derive visibility entries from geometry and apply them
    pub fn sample_intersections(&mut self) {
        let entries = self.visibility.sample(&self.view);
        self.on_intersection(&entries);
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Current time on the controller's clock
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the host should next call [`advance_to`](Self::advance_to)
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Run every timer due up to `now`, in deadline order
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((_, task)) = self.timers.pop_due(now) {
            match task {
                TimerTask::Typing => self.typing_tick(),
                TimerTask::Counter(id) => self.counter_tick(id),
            }
        }
        self.timers.advance_to(now);
    }

    pub fn advance_by(&mut self, elapsed: Duration) {
        self.advance_to(self.now() + elapsed);
    }

    fn typing_tick(&mut self) {
        let frame = self.typing.tick();
        if let Some(target) = &self.typing_target {
            self.view.set_text(target, &frame.text);
        }
        self.typing_timer = Some(self.timers.schedule(frame.delay, TimerTask::Typing));
    }

    fn start_counters(&mut self, reveal: Reveal<V::Handle>) {
        let interval = self.config.counter.step_interval();
        for (element, target) in reveal.counters {
            let id = self.counters.insert(RunningCounter {
                element,
                animation: CounterAnimation::new(target, self.config.counter.steps),
            });
            self.timers.schedule(interval, TimerTask::Counter(id));
            tracing::debug!(count = target, "counter started");
        }
    }

    fn counter_tick(&mut self, id: CounterId) {
        let Some(counter) = self.counters.get_mut(id) else {
            return;
        };
        let Some(frame) = counter.animation.step() else {
            self.counters.remove(id);
            return;
        };

        self.view.set_text(&counter.element, &frame.value.to_string());

        if frame.finished {
            self.counters.remove(id);
        } else {
            let interval = self.config.counter.step_interval();
            self.timers.schedule(interval, TimerTask::Counter(id));
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Every element that needs a click listener, without duplicates
    pub fn click_targets(&self) -> Vec<V::Handle> {
        let mut targets: Vec<V::Handle> = Vec::new();
        let candidates = self
            .mobile_nav
            .click_targets()
            .chain(self.floating_nav.buttons())
            .chain(self.anchors.links());
        for el in candidates {
            if !targets.contains(el) {
                targets.push(el.clone());
            }
        }
        targets
    }

    /// Elements still waiting for their first reveal
    pub fn observed(&self) -> &[V::Handle] {
        self.visibility.observed()
    }

    /// Intersection threshold hosts should configure native observers with
    pub fn visibility_threshold(&self) -> f64 {
        self.visibility.threshold()
    }

    pub fn typing(&self) -> &TypingAnimation {
        &self.typing
    }

    pub fn is_typing_scheduled(&self) -> bool {
        self.typing_timer.is_some_and(|id| self.timers.contains(id))
    }

    /// Tab of the last selected floating navigation button
    pub fn selected_tab(&self) -> Option<&str> {
        self.floating_nav.selected_tab()
    }

    pub fn is_header_scrolled(&self) -> bool {
        self.header.is_scrolled()
    }

    pub fn is_menu_open(&self) -> bool {
        self.mobile_nav.is_open(&self.view)
    }

    pub fn running_counters(&self) -> usize {
        self.counters.len()
    }
}
