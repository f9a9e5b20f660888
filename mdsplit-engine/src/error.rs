//! Engine error types

use thiserror::Error;

/// Engine-level errors
///
/// Text content never fails to split; only configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An argument is outside its valid range
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
