//! Typing headline animation
//!
//! Cycles through a fixed list of phrases, revealing and then removing one
//! character per tick.
//!
//! # States
//!
//! ```text
//!            reveal char            last char revealed
//!   Typing ──────────────► Typing ──────────────────► PausingFull
//!     ▲                                                   │ remove char
//!     │ reveal first char                                 ▼
//!   PausingEmpty ◄─────────────────────────────────── Deleting ◄─┐
//!              last char removed, next phrase            │ remove char
//!                                                        └───────┘
//! ```
//!
//! Each call to [`TypingAnimation::tick`] performs exactly one transition and
//! reports the text to display and the delay until the next tick.

use std::time::Duration;

use folio_core::{ConfigError, TypingConfig};

/// Where the typing cursor is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypingState {
    /// Revealing characters of the current phrase
    #[default]
    Typing,
    /// Current phrase fully shown; the next tick starts deleting
    PausingFull,
    /// Removing characters of the current phrase
    Deleting,
    /// Phrase fully removed and index advanced; the next tick starts typing
    PausingEmpty,
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    /// Text to display
    pub text: String,
    /// Delay before the next tick
    pub delay: Duration,
    /// State after this tick
    pub state: TypingState,
}

/// Tick delays per state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub pause_full: Duration,
    pub pause_empty: Duration,
}

impl From<&TypingConfig> for TypingTimings {
    fn from(config: &TypingConfig) -> Self {
        Self {
            type_interval: config.type_interval(),
            delete_interval: config.delete_interval(),
            pause_full: config.pause_full(),
            pause_empty: config.pause_empty(),
        }
    }
}

/// Typing/deleting cursor over a phrase list
#[derive(Debug, Clone)]
pub struct TypingAnimation {
    phrases: Vec<String>,
    timings: TypingTimings,
    state: TypingState,
    phrase_index: usize,
    /// Number of characters of the current phrase on screen
    char_index: usize,
}

impl TypingAnimation {
    /// Create an animation over non-empty phrases
    pub fn new(phrases: Vec<String>, timings: TypingTimings) -> Result<Self, ConfigError> {
        if phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if let Some(index) = phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPhrase(index));
        }

        Ok(Self {
            phrases,
            timings,
            state: TypingState::Typing,
            phrase_index: 0,
            char_index: 0,
        })
    }

    pub fn from_config(config: &TypingConfig) -> Result<Self, ConfigError> {
        Self::new(config.phrases.clone(), TypingTimings::from(config))
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    fn current_len(&self) -> usize {
        self.phrases[self.phrase_index].chars().count()
    }

    fn visible_text(&self) -> String {
        self.phrases[self.phrase_index]
            .chars()
            .take(self.char_index)
            .collect()
    }

    /// Perform one transition
    pub fn tick(&mut self) -> TypingFrame {
        let delay = match self.state {
            TypingState::Typing | TypingState::PausingEmpty => {
                self.char_index += 1;
                if self.char_index >= self.current_len() {
                    self.state = TypingState::PausingFull;
                    self.timings.pause_full
                } else {
                    self.state = TypingState::Typing;
                    self.timings.type_interval
                }
            }
            TypingState::PausingFull | TypingState::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.state = TypingState::PausingEmpty;
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.timings.pause_empty
                } else {
                    self.state = TypingState::Deleting;
                    self.timings.delete_interval
                }
            }
        };

        let text = self.visible_text();

        tracing::trace!(
            phrase = self.phrase_index,
            chars = self.char_index,
            state = ?self.state,
            "typing tick"
        );

        TypingFrame {
            text,
            delay,
            state: self.state,
        }
    }
}
