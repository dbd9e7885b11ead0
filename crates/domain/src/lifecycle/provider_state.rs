//! Provider lifecycle state machine
//!
//! ```text
//! Uninitialized -> Initializing -> Ready | Inconclusive -> Disposing -> Disposed
//! ```
//!
//! A provider that was never initialized may still be disposed; disposal is
//! then a no-op. So may one whose initialization was abandoned midway, so a
//! container started before the cancellation is still stopped.

use std::fmt;

use crate::errors::DomainError;

/// Lifecycle state of a database provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderState {
    #[default]
    Uninitialized,
    Initializing,
    /// A connection string was resolved and validated
    Ready,
    /// The backend could not be provisioned in this environment
    Inconclusive,
    Disposing,
    Disposed,
}

impl ProviderState {
    /// Check if moving to `next` is a legal transition
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Initializing | Self::Disposing)
                | (Self::Initializing, Self::Ready | Self::Inconclusive | Self::Disposing)
                | (Self::Ready | Self::Inconclusive, Self::Disposing)
                | (Self::Disposing, Self::Disposed)
        )
    }

    /// Move to `next`, rejecting illegal transitions
    pub const fn transition(self, next: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::invalid_transition(self, next))
        }
    }

    /// Check if initialization has finished, successfully or not
    pub const fn is_initialized(self) -> bool {
        matches!(
            self,
            Self::Ready | Self::Inconclusive | Self::Disposing | Self::Disposed
        )
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initializing => write!(f, "initializing"),
            Self::Ready => write!(f, "ready"),
            Self::Inconclusive => write!(f, "inconclusive"),
            Self::Disposing => write!(f, "disposing"),
            Self::Disposed => write!(f, "disposed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProviderState; 6] = [
        ProviderState::Uninitialized,
        ProviderState::Initializing,
        ProviderState::Ready,
        ProviderState::Inconclusive,
        ProviderState::Disposing,
        ProviderState::Disposed,
    ];

    #[test]
    fn happy_path_is_legal() {
        let state = ProviderState::Uninitialized
            .transition(ProviderState::Initializing)
            .and_then(|s| s.transition(ProviderState::Ready))
            .and_then(|s| s.transition(ProviderState::Disposing))
            .and_then(|s| s.transition(ProviderState::Disposed));
        assert_eq!(state, Ok(ProviderState::Disposed));
    }

    #[test]
    fn inconclusive_can_still_be_disposed() {
        assert!(ProviderState::Inconclusive.can_transition_to(ProviderState::Disposing));
    }

    #[test]
    fn uninitialized_can_be_disposed() {
        assert!(ProviderState::Uninitialized.can_transition_to(ProviderState::Disposing));
    }

    #[test]
    fn abandoned_initialization_can_be_disposed() {
        assert!(ProviderState::Initializing.can_transition_to(ProviderState::Disposing));
        assert!(!ProviderState::Initializing.can_transition_to(ProviderState::Disposed));
    }

    #[test]
    fn cannot_initialize_twice() {
        assert!(!ProviderState::Ready.can_transition_to(ProviderState::Initializing));
        assert!(!ProviderState::Initializing.can_transition_to(ProviderState::Initializing));
    }

    #[test]
    fn disposed_is_terminal() {
        for next in ALL {
            assert!(!ProviderState::Disposed.can_transition_to(next));
        }
    }

    #[test]
    fn illegal_transition_reports_both_states() {
        let err = ProviderState::Uninitialized
            .transition(ProviderState::Ready)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition(ProviderState::Uninitialized, ProviderState::Ready)
        );
    }

    #[test]
    fn initialized_states() {
        assert!(!ProviderState::Uninitialized.is_initialized());
        assert!(!ProviderState::Initializing.is_initialized());
        assert!(ProviderState::Ready.is_initialized());
        assert!(ProviderState::Inconclusive.is_initialized());
        assert!(ProviderState::Disposed.is_initialized());
    }
}
