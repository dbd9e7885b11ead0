//! Application-level errors

use domain::{ConnectionState, DomainError};
use thiserror::Error;

use crate::ports::{ContainerError, DriverError};

/// Errors that can occur while provisioning or using a database fixture
///
/// `Uninitialized`, `InvalidConnectionState` and `Domain` are hard failures
/// that propagate to the test unchanged. `Driver` and `Container` describe
/// an environment that cannot provide the backend and are turned into an
/// inconclusive outcome at the provider boundary.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Connection string requested before initialization completed
    #[error("{provider}: initialize must be called before accessing the connection string")]
    Uninitialized { provider: String },

    /// A freshly created connection is not in the state the operation
    /// guarantees
    #[error("Connection should be {expected} but is {actual}")]
    InvalidConnectionState {
        expected: ConnectionState,
        actual: ConnectionState,
    },

    /// Driver error
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Container engine error
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FixtureError {
    /// Create an uninitialized error for a provider
    pub fn uninitialized(provider: impl Into<String>) -> Self {
        Self::Uninitialized {
            provider: provider.into(),
        }
    }

    /// Message of the root failure, as reported to a skipped suite
    pub fn detail(&self) -> String {
        match self {
            Self::Driver(e) => e.detail(),
            Self::Container(e) => e.detail(),
            other => other.to_string(),
        }
    }

    /// Check if this error means the backend is unavailable in the current
    /// environment rather than a defect
    pub const fn is_unavailability(&self) -> bool {
        matches!(self, Self::Driver(_) | Self::Container(_))
    }
}
