//! Result of provider initialization

use crate::value_objects::ProviderName;

/// Outcome of initializing a provider
///
/// `Inconclusive` is not a failure: the environment cannot run suites bound
/// to this provider (for example no container engine is present), so they
/// are skipped with the carried reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The provider resolved and validated a connection string
    Ready { connection_string: String },
    /// The provider could not be provisioned
    Inconclusive { reason: String },
}

impl InitOutcome {
    /// Create a ready outcome
    pub fn ready(connection_string: impl Into<String>) -> Self {
        Self::Ready {
            connection_string: connection_string.into(),
        }
    }

    /// Create an inconclusive outcome with the standard
    /// `"{provider} is unavailable: {message}"` reason
    pub fn unavailable(provider: &ProviderName, message: impl std::fmt::Display) -> Self {
        Self::Inconclusive {
            reason: provider.unavailable_reason(message),
        }
    }

    /// Check if the provider is ready
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Connection string, if ready
    pub fn connection_string(&self) -> Option<&str> {
        match self {
            Self::Ready { connection_string } => Some(connection_string),
            Self::Inconclusive { .. } => None,
        }
    }

    /// Skip reason, if inconclusive
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready { .. } => None,
            Self::Inconclusive { reason } => Some(reason),
        }
    }
}
