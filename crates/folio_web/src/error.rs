//! Error types for the browser driver

use folio_core::ConfigError;
use thiserror::Error;

/// Failures while wiring the effects to the page
#[derive(Error, Debug)]
pub enum WebError {
    /// No global `window` (not running in a browser main thread)
    #[error("No window available")]
    NoWindow,

    /// The window has no document
    #[error("No document available")]
    NoDocument,

    /// The embedded page config is invalid
    #[error("Invalid page config: {0}")]
    Config(#[from] ConfigError),

    /// A DOM call threw
    #[error("DOM call failed: {0}")]
    Js(String),
}

/// Result type for browser driver operations
pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
