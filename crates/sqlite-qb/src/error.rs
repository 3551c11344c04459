//! Error types for sqlite-qb

use thiserror::Error;

/// Result type alias for builder and render operations
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised while constructing, rendering or snapshotting nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// Malformed binding parameter marker
    #[error("Invalid binding parameter: {0:?}")]
    InvalidParameter(String),

    /// A collection that must hold at least one element was empty
    #[error("Empty {0} is not allowed")]
    EmptyList(&'static str),

    /// `DISTINCT` aggregate called with anything but one argument
    #[error("DISTINCT requires exactly one argument, got {0}")]
    DistinctArity(usize),

    /// A placeholder was rendered or snapshotted before a value was set
    #[error("Placeholder {0} has no value")]
    UnsetPlaceholder(&'static str),

    /// Qualified name parts were all absent or had a gap
    #[error("Invalid qualified name: {0}")]
    QualifiedName(String),

    /// Other construction-time validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl QbError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error comes from an unset placeholder
    pub fn is_unset_placeholder(&self) -> bool {
        matches!(self, Self::UnsetPlaceholder(_))
    }

    /// Check if this error is a rejected binding parameter
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            QbError::InvalidParameter("?0".into()).to_string(),
            "Invalid binding parameter: \"?0\""
        );
        assert_eq!(
            QbError::UnsetPlaceholder("expression").to_string(),
            "Placeholder expression has no value"
        );
        assert_eq!(
            QbError::DistinctArity(2).to_string(),
            "DISTINCT requires exactly one argument, got 2"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(QbError::UnsetPlaceholder("table").is_unset_placeholder());
        assert!(!QbError::EmptyList("row").is_unset_placeholder());
        assert!(QbError::InvalidParameter("x".into()).is_invalid_parameter());
    }
}
