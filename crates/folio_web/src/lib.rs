//! Folio Web
//!
//! Browser driver for the portfolio page effects. Loading the module attaches
//! a [`Session`] to the document once it has been parsed; the session lives
//! for the rest of the page.
//!
//! # Page config
//!
//! Selector names, timings, and phrases can be overridden with a JSON block
//! in the page:
//!
//! ```html
//! <script type="application/json" id="folio-config">
//!   { "typing": { "phrases": ["Engineer", "Tinkerer"] } }
//! </script>
//! ```
//!
//! Everything except [`WebError`] is only built for `wasm32`.

pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod driver;
#[cfg(target_arch = "wasm32")]
pub mod logging;

pub use error::{Result, WebError};

#[cfg(target_arch = "wasm32")]
pub use dom::DomView;
#[cfg(target_arch = "wasm32")]
pub use driver::{Session, CONFIG_ELEMENT_ID};

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::driver::Session;
    use crate::logging;

    thread_local! {
        static SESSION: RefCell<Option<Rc<Session>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        logging::init(tracing::Level::INFO);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            tracing::error!("no document, page effects disabled");
            return;
        };

        if document.ready_state() != "loading" {
            attach();
            return;
        }

        let on_ready = Closure::once_into_js(attach);
        if let Err(err) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            tracing::error!(?err, "failed to wait for DOMContentLoaded");
        }
    }

    fn attach() {
        match Session::attach() {
            Ok(session) => SESSION.with(|slot| *slot.borrow_mut() = Some(session)),
            Err(err) => tracing::error!(%err, "failed to start page effects"),
        }
    }

    /// Restart the effects after [`stop_effects`]
    #[wasm_bindgen(js_name = startEffects)]
    pub fn start_effects() {
        SESSION.with(|slot| {
            if let Some(session) = slot.borrow().as_ref() {
                session.start();
            }
        });
    }

    /// Cancel timers and stop reacting to the page
    #[wasm_bindgen(js_name = stopEffects)]
    pub fn stop_effects() {
        SESSION.with(|slot| {
            if let Some(session) = slot.borrow().as_ref() {
                session.stop();
            }
        });
    }
}
