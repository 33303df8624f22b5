//! Style sheet errors

/// Errors raised by the manager and by style hosts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// A mutation was attempted before a sheet or style element was set up
    #[error("Cannot {operation}: no style sheet has been set")]
    Uninitialized { operation: &'static str },

    /// Rule index outside the sheet's current rule list
    #[error("Index {index} is out of range for a sheet with {len} rules")]
    InvalidIndex { index: usize, len: usize },

    /// The host's CSS parser rejected the rule text
    #[error("Malformed rule `{rule}`: {message}")]
    MalformedRule { rule: String, message: String },

    /// A style argument was neither declaration text nor a declaration map
    #[error("Expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// Any other failure reported by the host environment
    #[error("Host error: {0}")]
    Host(String),
}

impl StyleError {
    pub(crate) fn malformed(rule: &str, message: impl Into<String>) -> Self {
        Self::MalformedRule {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, StyleError>;
