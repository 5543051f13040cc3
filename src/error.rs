//! Error types for scope parsing and configuration

use thiserror::Error;

/// Result type alias for scope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Errors raised while building scope items, collections, or configuration.
///
/// Containment queries never fail; every error surfaces at parse or
/// construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A value that is neither a scope string, a parsed item, nor a sequence
    #[error("object not supported as scope item: {found}")]
    TypeMismatch { found: String },

    /// A scope item was built with no path segments
    #[error("scope item path cannot be empty")]
    EmptyPath,

    /// A configured separator is the empty string
    #[error("{name} cannot be empty")]
    EmptySeparator { name: &'static str },

    /// Configuration document could not be read
    #[error("invalid scope configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ScopeError {
    fn from(err: serde_json::Error) -> Self {
        ScopeError::InvalidConfig(err.to_string())
    }
}
