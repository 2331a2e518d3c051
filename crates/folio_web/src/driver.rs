//! Page session
//!
//! A [`Session`] owns the controller for the live page and connects it to the
//! browser: one window scroll listener, one click listener per interactive
//! element, a native `IntersectionObserver`, and a single pending
//! `setTimeout` that is re-armed at the controller's next deadline.
//!
//! The controller clock follows `performance.now()`. Every callback first
//! advances the controller to the current time, then runs, then re-arms the
//! timer.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::EffectsConfig;
use folio_effects::{EffectsController, IntersectionEntry};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::dom::DomView;
use crate::error::Result;

/// Id of the optional `<script type="application/json">` element holding
/// config overrides
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// The effects attached to the live page
pub struct Session {
    controller: RefCell<EffectsController<DomView>>,
    window: Window,
    /// Handle and deadline (ms) of the armed timeout
    pending: Cell<Option<(i32, f64)>>,
    wake: Closure<dyn FnMut()>,
    observer: OnceCell<IntersectionObserver>,
}

impl Session {
    /// Bind the effects to the document and start them
    pub fn attach() -> Result<Rc<Self>> {
        let view = DomView::new()?;
        let window = view.window().clone();
        let config = read_config(view.document())?;
        let controller = EffectsController::new(view, config)?;

        let session = Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            Self {
                controller: RefCell::new(controller),
                window,
                pending: Cell::new(None),
                wake: Closure::<dyn FnMut()>::new(move || {
                    if let Some(session) = weak.upgrade() {
                        session.fire();
                    }
                }),
                observer: OnceCell::new(),
            }
        });

        // The observer callback needs the session, so it is connected after
        let observer = session.connect_observer()?;
        session.observer.get_or_init(|| observer);

        session.listen_scroll()?;
        session.listen_clicks()?;
        session.start();

        tracing::debug!("page session attached");
        Ok(session)
    }

    /// Start (or restart) the effects
    pub fn start(&self) {
        self.dispatch(|controller| {
            controller.start();
            if let Some(observer) = self.observer.get() {
                for element in controller.observed() {
                    observer.observe(element);
                }
            }
        });
    }

    /// Cancel timers and disconnect the observer
    pub fn stop(&self) {
        self.dispatch(|controller| controller.stop());
        if let Some(observer) = self.observer.get() {
            observer.disconnect();
        }
        if let Some((handle, _)) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run `f` on the controller at the current time, then re-arm the timer
    ///
    /// Returns `None` when the controller is already borrowed further up the
    /// stack; the event is dropped.
    fn dispatch<R>(&self, f: impl FnOnce(&mut EffectsController<DomView>) -> R) -> Option<R> {
        let result = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                tracing::warn!("controller busy, dropping event");
                return None;
            };
            controller.advance_to(self.now());
            f(&mut controller)
        };
        self.arm();
        Some(result)
    }

    fn now(&self) -> Duration {
        let ms = self.window.performance().map(|p| p.now()).unwrap_or(0.0);
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }

    // =========================================================================
    // Timer
    // =========================================================================

    fn arm(&self) {
        let deadline = match self.controller.try_borrow() {
            Ok(controller) => controller.next_deadline(),
            Err(_) => return,
        };
        let Some(deadline) = deadline else {
            return;
        };
        let deadline_ms = deadline.as_secs_f64() * 1000.0;

        if let Some((handle, at)) = self.pending.get() {
            if at <= deadline_ms {
                return;
            }
            self.window.clear_timeout_with_handle(handle);
            self.pending.set(None);
        }

        let now_ms = self.now().as_secs_f64() * 1000.0;
        let delay = (deadline_ms - now_ms).max(0.0).ceil() as i32;

        let wake: &js_sys::Function = self.wake.as_ref().unchecked_ref();
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(wake, delay)
        {
            Ok(handle) => self.pending.set(Some((handle, deadline_ms))),
            Err(err) => tracing::error!(?err, "failed to arm timer"),
        }
    }

    fn fire(&self) {
        self.pending.set(None);
        self.dispatch(|_| ());
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    fn listen_scroll(self: &Rc<Self>) -> Result<()> {
        let session = Rc::clone(self);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            session.dispatch(|controller| controller.on_scroll());
        });
        self.window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn listen_clicks(self: &Rc<Self>) -> Result<()> {
        let targets = self.controller.borrow().click_targets();

        for target in targets {
            let session = Rc::clone(self);
            let element = target.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let outcome = session.dispatch(|controller| controller.on_click(&element));
                if outcome.is_some_and(|o| o.prevent_default) {
                    event.prevent_default();
                }
            });
            target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn connect_observer(self: &Rc<Self>) -> Result<IntersectionObserver> {
        let (threshold, root_margin) = {
            let controller = self.controller.borrow();
            (
                controller.visibility_threshold(),
                controller.config().visibility.root_margin,
            )
        };

        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let Some(session) = weak.upgrade() else {
                    return;
                };
                let entries: Vec<IntersectionEntry<Element>> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();

                session.dispatch(|controller| {
                    controller.on_intersection(&entries);
                    // Revealed elements are done for good
                    for entry in &entries {
                        if !controller.observed().contains(&entry.target) {
                            observer.unobserve(&entry.target);
                        }
                    }
                });
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(&format!("{root_margin}px"));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        callback.forget();
        Ok(observer)
    }
}

/// Config overrides embedded in the page, or the defaults
fn read_config(document: &Document) -> Result<EffectsConfig> {
    let Some(source) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Ok(EffectsConfig::default());
    };

    let config = EffectsConfig::from_json_str(&source)?;
    tracing::debug!("loaded page config overrides");
    Ok(config)
}
