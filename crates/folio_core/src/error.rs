//! Configuration error types

use thiserror::Error;

/// Errors produced while loading or validating an [`EffectsConfig`](crate::EffectsConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML source could not be parsed
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON source could not be parsed
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The typing animation has nothing to type
    #[error("Typing phrase list is empty")]
    NoPhrases,

    /// A phrase in the typing list has no characters
    #[error("Typing phrase at index {0} is empty")]
    EmptyPhrase(usize),

    /// A tick interval or step count is zero
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    /// A value lies outside its allowed range
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
