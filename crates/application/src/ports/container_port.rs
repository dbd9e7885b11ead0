//! Container engine port
//!
//! A [`ContainerBuilder`] produces a fresh [`DatabaseContainer`] each time it
//! is asked. The container is started once, its connection string read once,
//! and stopped once by the provider that built it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors that can occur when working with containers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Container could not be described or created
    #[error("Container build failed: {0}")]
    Build(String),

    /// Container failed to start
    #[error("Container failed to start: {0}")]
    Start(String),

    /// Container failed to stop
    #[error("Container failed to stop: {0}")]
    Stop(String),

    /// Operation requires a running container
    #[error("Container is not running")]
    NotRunning,

    /// Endpoint of a running container could not be resolved
    #[error("Failed to resolve container endpoint: {0}")]
    Endpoint(String),
}

impl ContainerError {
    /// Message of the underlying failure without the category prefix
    pub fn detail(&self) -> String {
        match self {
            Self::Build(msg) | Self::Start(msg) | Self::Stop(msg) | Self::Endpoint(msg) => {
                msg.clone()
            },
            Self::NotRunning => self.to_string(),
        }
    }
}

/// Factory for disposable database containers
#[cfg_attr(test, automock)]
pub trait ContainerBuilder: Send + Sync {
    /// Produce a new, not yet started container
    fn build(&self) -> Result<Box<dyn DatabaseContainer>, ContainerError>;
}

/// A disposable database instance
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseContainer: Send {
    /// Start the container and wait until the engine reports ready
    ///
    /// No timeout is imposed here; whatever the engine enforces applies.
    async fn start(&mut self) -> Result<(), ContainerError>;

    /// Stop the container
    async fn stop(&mut self) -> Result<(), ContainerError>;

    /// Connection string of the running container
    fn connection_string(&self) -> Result<String, ContainerError>;
}
