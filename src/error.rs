//! Error types for everything around the search itself.
//!
//! The search never fails: an unreachable target is `None`. These errors come
//! from turning text (config files, CLI flags) into graph data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwapError {
    /// Text that does not parse as a decimal number.
    #[error("invalid decimal '{value}': {reason}")]
    InvalidDecimal { value: String, reason: String },

    /// Conversion rates must be strictly positive.
    #[error("rate for {from} -> {to} must be positive, got {rate}")]
    NonPositiveRate { from: String, to: String, rate: String },

    #[error("conversion pair #{index} has an empty currency code")]
    EmptyCurrency { index: usize },

    #[error("unknown search strategy '{0}', expected 'recursive' or 'layered'")]
    UnknownStrategy(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
