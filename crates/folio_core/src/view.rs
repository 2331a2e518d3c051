//! View binding
//!
//! [`ViewBinding`] is the only way the effects reach the page. A binding
//! supplies element handles for [`Query`] lookups and performs the handful of
//! presentation mutations the behaviors need: class flags, text, inline style,
//! and scrolling.
//!
//! # Coordinates
//!
//! All vertical positions are CSS pixels.
//!
//! - [`ViewBinding::bounding_rect`] is relative to the top of the viewport
//!   (what `getBoundingClientRect` reports), so it moves with scrolling.
//! - [`ViewBinding::offset_rect`] is relative to the top of the document
//!   (what `offsetTop`/`offsetHeight` report), so it does not.

use std::fmt;

use crate::query::Query;

/// Inline style property written by the parallax shifter
pub const BACKGROUND_POSITION_Y: &str = "background-position-y";
/// Inline style property written for staggered card fade-ins
pub const TRANSITION_DELAY: &str = "transition-delay";

/// Vertical extent of an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < bottom`
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Shift by a vertical offset
    pub fn translate(&self, dy: f64) -> Self {
        Self::new(self.top + dy, self.height)
    }
}

/// How a programmatic scroll moves the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump immediately
    Instant,
    /// Let the host animate the scroll
    #[default]
    Smooth,
}

/// Access to the hosting page
///
/// Read methods take `&self`; anything that changes what the user sees takes
/// `&mut self`. Handles are cheap to clone and compare.
pub trait ViewBinding {
    /// Handle to one page element
    type Handle: Clone + PartialEq + fmt::Debug;

    /// All elements matching `query`, in document order
    fn query_all(&self, query: &Query) -> Vec<Self::Handle>;

    /// Descendants of `root` matching `query`, in document order
    fn query_within(&self, root: &Self::Handle, query: &Query) -> Vec<Self::Handle>;

    /// First element matching `query`
    fn query_first(&self, query: &Query) -> Option<Self::Handle> {
        self.query_all(query).into_iter().next()
    }

    /// Element with the given `id`
    fn element_by_id(&self, id: &str) -> Option<Self::Handle> {
        self.query_first(&Query::id(id))
    }

    fn has_class(&self, element: &Self::Handle, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Handle, class: &str);

    fn remove_class(&mut self, element: &Self::Handle, class: &str);

    /// Flip a class, returning whether it is now present
    fn toggle_class(&mut self, element: &Self::Handle, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn attribute(&self, element: &Self::Handle, name: &str) -> Option<String>;

    /// Replace the element's text content
    fn set_text(&mut self, element: &Self::Handle, text: &str);

    /// Set one inline style property
    fn set_style(&mut self, element: &Self::Handle, property: &str, value: &str);

    /// Current vertical scroll offset of the window
    fn scroll_y(&self) -> f64;

    /// Height of the visible viewport
    fn viewport_height(&self) -> f64;

    /// Extent relative to the viewport top
    fn bounding_rect(&self, element: &Self::Handle) -> Option<Bounds>;

    /// Extent relative to the document top
    fn offset_rect(&self, element: &Self::Handle) -> Option<Bounds>;

    /// Scroll the window to a vertical offset
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}
