//! Folio Effects
//!
//! Presentation behaviors of the portfolio page and the controller that
//! owns them. Every behavior reaches the page only through a
//! [`ViewBinding`](folio_core::ViewBinding), so the same code runs against the
//! browser DOM and against [`MemoryDocument`](folio_core::memory::MemoryDocument).
//!
//! | Behavior | Trigger | Effect |
//! |---|---|---|
//! | [`HeaderScrollReactor`] | scroll | `scrolled` flag on the header |
//! | [`MobileNavToggle`] | click | opens/closes the mobile menu |
//! | [`FloatingNavSelector`] | click | single active floating button |
//! | typing headline | timer | types and deletes phrases |
//! | [`VisibilityAnimator`] | intersection | fade-in, statistics counters |
//! | [`AnchorScroller`] | click | smooth scroll below the fixed header |
//! | [`ActiveLinkHighlighter`] | scroll | active nav link for the current section |
//! | [`ParallaxShifter`] | scroll | slower hero background |

pub mod active_link;
pub mod anchor;
pub mod controller;
pub mod header;
pub mod nav;
pub mod parallax;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use active_link::ActiveLinkHighlighter;
pub use anchor::{AnchorScroller, ClickOutcome};
pub use controller::{CounterId, EffectsController};
pub use header::HeaderScrollReactor;
pub use nav::{FloatingNavSelector, MobileNavToggle};
pub use parallax::ParallaxShifter;
pub use visibility::{IntersectionEntry, Reveal, VisibilityAnimator};
