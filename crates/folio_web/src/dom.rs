//! DOM view binding
//!
//! [`DomView`] implements [`ViewBinding`] over `web_sys` elements. Mutations
//! that throw (an invalid class token, a rejected style value) are logged and
//! skipped so one bad element never stops the other effects.

use folio_core::{Bounds, Query, ScrollBehavior, ViewBinding};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollToOptions, Window};

use crate::error::{Result, WebError};

/// The live page
#[derive(Debug, Clone)]
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn elements(list: NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl ViewBinding for DomView {
    type Handle = Element;

    fn query_all(&self, query: &Query) -> Vec<Element> {
        match self.document.query_selector_all(&query.to_string()) {
            Ok(list) => Self::elements(list),
            Err(err) => {
                tracing::warn!(%query, ?err, "selector rejected");
                Vec::new()
            }
        }
    }

    fn query_within(&self, root: &Element, query: &Query) -> Vec<Element> {
        match root.query_selector_all(&query.to_string()) {
            Ok(list) => Self::elements(list),
            Err(err) => {
                tracing::warn!(%query, ?err, "selector rejected");
                Vec::new()
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            tracing::warn!(class, ?err, "failed to add class");
        }
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            tracing::warn!(class, ?err, "failed to remove class");
        }
    }

    fn toggle_class(&mut self, element: &Element, class: &str) -> bool {
        match element.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                tracing::warn!(class, ?err, "failed to toggle class");
                self.has_class(element, class)
            }
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            tracing::warn!(property, value, ?err, "failed to set style");
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, element: &Element) -> Option<Bounds> {
        let rect = element.get_bounding_client_rect();
        Some(Bounds::new(rect.top(), rect.height()))
    }

    fn offset_rect(&self, element: &Element) -> Option<Bounds> {
        let html = element.dyn_ref::<HtmlElement>()?;
        Some(Bounds::new(
            f64::from(html.offset_top()),
            f64::from(html.offset_height()),
        ))
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
