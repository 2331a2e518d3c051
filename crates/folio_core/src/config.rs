//! Effects configuration
//!
//! Every tunable of the page effects lives here, grouped per behavior. All
//! fields default to the values the portfolio page was designed with, so a
//! config source only needs to name the fields it overrides.
//!
//! # Example
//!
//! ```rust
//! use folio_core::EffectsConfig;
//!
//! let config = EffectsConfig::from_toml_str(
//!     r#"
//!     [typing]
//!     phrases = ["Rustacean", "Tinkerer"]
//!
//!     [header]
//!     scrolled_threshold = 120.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.typing.phrases.len(), 2);
//! assert_eq!(config.anchor.header_offset, 80.0);
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

// =============================================================================
// Top-level configuration
// =============================================================================

/// Complete configuration for the effects controller
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Element identifiers and class names the behaviors look up
    pub selectors: SelectorConfig,
    /// Presentation flag names written onto elements
    pub flags: FlagConfig,
    pub header: HeaderConfig,
    pub typing: TypingConfig,
    pub counter: CounterConfig,
    pub visibility: VisibilityConfig,
    pub anchor: AnchorConfig,
    pub active_link: ActiveLinkConfig,
    pub parallax: ParallaxConfig,
    pub greeting: GreetingConfig,
}

impl EffectsConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EffectsConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: EffectsConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded effects config");
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|err| {
            tracing::warn!(%err, "rejected effects config");
            err
        })
    }

    fn check(&self) -> Result<()> {
        if self.typing.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if let Some(index) = self.typing.phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPhrase(index));
        }

        non_zero("typing.type_interval_ms", self.typing.type_interval_ms)?;
        non_zero("typing.delete_interval_ms", self.typing.delete_interval_ms)?;
        non_zero("counter.steps", u64::from(self.counter.steps))?;

        if !(0.0..=1.0).contains(&self.visibility.threshold) {
            return Err(ConfigError::OutOfRange {
                field: "visibility.threshold",
                value: self.visibility.threshold,
            });
        }

        finite("header.scrolled_threshold", self.header.scrolled_threshold)?;
        finite("anchor.header_offset", self.anchor.header_offset)?;
        finite("active_link.probe_offset", self.active_link.probe_offset)?;
        finite("parallax.factor", self.parallax.factor)?;

        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::Zero { field });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}

// =============================================================================
// Element names
// =============================================================================

/// Identifiers, class names, and data attributes of the hosting page
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub header_id: String,
    pub nav_toggle_id: String,
    pub nav_menu_id: String,
    pub nav_link_class: String,
    pub floating_button_class: String,
    pub typing_text_id: String,
    /// Class of page sections that fade in
    pub section_class: String,
    /// Tag of sections that take part in active-link highlighting
    pub section_tag: String,
    /// Class of the statistics container
    pub stats_class: String,
    /// Class of counter elements inside the statistics container
    pub stat_value_class: String,
    /// Classes of cards that fade in with a stagger
    pub card_classes: Vec<String>,
    pub hero_class: String,
    /// Attribute holding a counter's target value
    pub count_attribute: String,
    /// Attribute holding a floating button's logical tab
    pub tab_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            header_id: "header".to_string(),
            nav_toggle_id: "nav-toggle".to_string(),
            nav_menu_id: "nav-menu".to_string(),
            nav_link_class: "nav__link".to_string(),
            floating_button_class: "floating-nav__btn".to_string(),
            typing_text_id: "typing-text".to_string(),
            section_class: "section".to_string(),
            section_tag: "section".to_string(),
            stats_class: "stats".to_string(),
            stat_value_class: "stat-value".to_string(),
            card_classes: vec![
                "about-card".to_string(),
                "bento-card".to_string(),
                "project-card".to_string(),
                "timeline-item".to_string(),
            ],
            hero_class: "hero".to_string(),
            count_attribute: "data-count".to_string(),
            tab_attribute: "data-tab".to_string(),
        }
    }
}

/// Presentation flag names interpreted by the stylesheet
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlagConfig {
    pub scrolled: String,
    pub active: String,
    pub visible: String,
    pub fade_in: String,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            scrolled: "scrolled".to_string(),
            active: "active".to_string(),
            visible: "visible".to_string(),
            fade_in: "fade-in".to_string(),
        }
    }
}

// =============================================================================
// Behavior tunables
// =============================================================================

/// Header scroll reactor
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Scroll offset above which the header is flagged as scrolled (strictly greater)
    pub scrolled_threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
        }
    }
}

/// Typing headline animation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Phrases cycled through in order
    pub phrases: Vec<String>,
    /// Delay between revealed characters
    pub type_interval_ms: u64,
    /// Delay between removed characters
    pub delete_interval_ms: u64,
    /// Pause once a phrase is fully typed
    pub pause_full_ms: u64,
    /// Pause once a phrase is fully deleted
    pub pause_empty_ms: u64,
    /// Delay between controller start and the first tick
    pub start_delay_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "KMH".to_string(),
                "Game Developer".to_string(),
                "Full Stack Developer".to_string(),
                "Problem Solver".to_string(),
            ],
            type_interval_ms: 150,
            delete_interval_ms: 80,
            pause_full_ms: 2000,
            pause_empty_ms: 500,
            start_delay_ms: 1000,
        }
    }
}

impl TypingConfig {
    pub fn type_interval(&self) -> Duration {
        Duration::from_millis(self.type_interval_ms)
    }

    pub fn delete_interval(&self) -> Duration {
        Duration::from_millis(self.delete_interval_ms)
    }

    pub fn pause_full(&self) -> Duration {
        Duration::from_millis(self.pause_full_ms)
    }

    pub fn pause_empty(&self) -> Duration {
        Duration::from_millis(self.pause_empty_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Statistics counter animation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Total time from 0 to the target value
    pub duration_ms: u64,
    /// Number of discrete display updates
    pub steps: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            steps: 50,
        }
    }
}

impl CounterConfig {
    /// Time between two counter updates (duration / steps)
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.duration_ms) / self.steps.max(1)
    }
}

/// Visibility-triggered fade-in
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Visible fraction of an element that counts as "in view"
    pub threshold: f64,
    /// Margin added around the viewport when sampling geometry
    pub root_margin: f64,
    /// Transition delay added per card, in card order
    pub card_stagger_ms: u64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: 0.0,
            card_stagger_ms: 100,
        }
    }
}

/// Smooth anchor scrolling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Height of the fixed header subtracted from the destination
    pub header_offset: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
        }
    }
}

/// Active navigation link highlighting
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActiveLinkConfig {
    /// Added to the scroll offset before testing section extents
    pub probe_offset: f64,
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            probe_offset: 100.0,
        }
    }
}

/// Hero background parallax
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Background shift per unit of scroll
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { factor: 0.5 }
    }
}

/// Lines logged once when the controller starts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub lines: Vec<String>,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "🎮 Welcome to KMH Portfolio!".to_string(),
                "Looking for a developer? Let's connect!".to_string(),
            ],
        }
    }
}
