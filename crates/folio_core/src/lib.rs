//! Folio Core
//!
//! Shared foundation for the portfolio page effects:
//!
//! - **Configuration**: [`EffectsConfig`], one documented field per tunable, loadable from TOML or JSON
//! - **Queries**: [`Query`], the selector shapes the effects look elements up by
//! - **View Binding**: [`ViewBinding`], the injected access to the hosting page
//! - **Memory Document**: [`memory::MemoryDocument`], a browser-free [`ViewBinding`]

pub mod config;
pub mod error;
pub mod memory;
pub mod query;
pub mod view;

pub use config::{
    ActiveLinkConfig, AnchorConfig, CounterConfig, EffectsConfig, FlagConfig, GreetingConfig,
    HeaderConfig, ParallaxConfig, SelectorConfig, TypingConfig, VisibilityConfig,
};
pub use error::{ConfigError, Result};
pub use query::Query;
pub use view::{Bounds, ScrollBehavior, ViewBinding, BACKGROUND_POSITION_Y, TRANSITION_DELAY};
