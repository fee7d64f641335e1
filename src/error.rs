//! Error types for color parsing and wheel configuration.

use thiserror::Error;

/// Errors raised at the fallible edges of the crate.
///
/// The interaction core itself is total; only text parsing and
/// configuration loading can fail.
#[derive(Error, Debug)]
pub enum WheelError {
    /// Hex string with a bad length or non-hex digits
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    /// A component list that could not be parsed
    #[error("invalid {model} component '{value}'")]
    InvalidComponent {
        /// Color model being parsed ("rgb" or "hsb")
        model: &'static str,
        /// Offending text
        value: String,
    },

    /// Configuration values that cannot describe three rings
    #[error("invalid wheel config: {0}")]
    InvalidConfig(String),

    /// JSON parsing error while loading configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
