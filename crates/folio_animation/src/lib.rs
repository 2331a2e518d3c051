//! Folio Animation
//!
//! Time-driven pieces of the page effects.
//!
//! # Features
//!
//! - **Timer Queue**: deterministic one-shot timers on a host-advanced clock
//! - **Typing Animation**: four-state typing/deleting cursor over a phrase list
//! - **Counters**: stepwise integer counts that land exactly on their target

pub mod counter;
pub mod timer;
pub mod typing;

pub use counter::{parse_count, CounterAnimation, CounterFrame};
pub use timer::{TimerId, TimerQueue};
pub use typing::{TypingAnimation, TypingFrame, TypingState, TypingTimings};
