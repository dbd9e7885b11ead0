//! Domain-level errors

use thiserror::Error;

use crate::lifecycle::ProviderState;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Provider name is empty or contains characters not allowed in an
    /// environment variable name
    #[error("Invalid provider name: {0}")]
    InvalidProviderName(String),

    /// Provider lifecycle was driven out of order
    #[error("Invalid provider state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: ProviderState,
        to: ProviderState,
    },
}

impl DomainError {
    /// Create an invalid transition error
    pub const fn invalid_transition(from: ProviderState, to: ProviderState) -> Self {
        Self::InvalidStateTransition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_creates_correct_error() {
        let err = DomainError::invalid_transition(ProviderState::Disposed, ProviderState::Ready);
        match err {
            DomainError::InvalidStateTransition { from, to } => {
                assert_eq!(from, ProviderState::Disposed);
                assert_eq!(to, ProviderState::Ready);
            },
            _ => unreachable!("Expected InvalidStateTransition error"),
        }
    }

    #[test]
    fn invalid_transition_error_message() {
        let err =
            DomainError::invalid_transition(ProviderState::Uninitialized, ProviderState::Ready);
        assert_eq!(
            err.to_string(),
            "Invalid provider state transition: uninitialized -> ready"
        );
    }

    #[test]
    fn invalid_provider_name_error_message() {
        let err = DomainError::InvalidProviderName("My Sql".to_string());
        assert_eq!(err.to_string(), "Invalid provider name: My Sql");
    }
}
