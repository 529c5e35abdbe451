//! Error types for shell-highlight
//!
//! Tokenizing itself never fails; these errors come from building rule
//! tables, loading configuration and rendering.

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown token kind: {0}")]
    UnknownTokenKind(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Invalid pair: {0}")]
    InvalidPair(String),

    #[error("{0}")]
    Message(String),
}
