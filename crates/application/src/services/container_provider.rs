//! Container-backed provider
//!
//! Initialization resolves the connection string in this order:
//!
//! 1. `DapperTests_{Name}_ConnectionString` from the environment. When set,
//!    no container is ever built.
//! 2. Otherwise a fresh container is built, started, and asked for its
//!    connection string.
//!
//! Either way the string is validated by opening and closing one real
//! connection. Any failure after the environment lookup turns the provider
//! [`ProviderState::Inconclusive`] instead of failing the suite, since a
//! missing container engine is an environment condition, not a defect.
//!
//! There is exactly one container per provider and no retry: a failed start
//! is final for this provider.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use domain::{InitOutcome, ProviderName, ProviderState};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::connection_factory;
use super::provider::{AsyncLifetime, DatabaseProvider};
use crate::error::FixtureError;
use crate::ports::{ContainerBuilder, DatabaseContainer, DriverFactory, EnvironmentPort};

/// Provider that falls back to a disposable container
pub struct ContainerProvider {
    name: ProviderName,
    factory: Arc<dyn DriverFactory>,
    builder: Arc<dyn ContainerBuilder>,
    environment: Arc<dyn EnvironmentPort>,
    state: Mutex<ProviderState>,
    connection_string: OnceLock<String>,
    container: tokio::sync::Mutex<Option<Box<dyn DatabaseContainer>>>,
}

impl std::fmt::Debug for ContainerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerProvider")
            .field("name", &self.name)
            .field("factory", &self.factory.name())
            .field("state", &*self.state.lock())
            .field("connection_string", &self.connection_string.get())
            .finish_non_exhaustive()
    }
}

impl ContainerProvider {
    /// Create an uninitialized provider
    pub fn new(
        name: ProviderName,
        factory: Arc<dyn DriverFactory>,
        builder: Arc<dyn ContainerBuilder>,
        environment: Arc<dyn EnvironmentPort>,
    ) -> Self {
        Self {
            name,
            factory,
            builder,
            environment,
            state: Mutex::new(ProviderState::Uninitialized),
            connection_string: OnceLock::new(),
            container: tokio::sync::Mutex::new(None),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ProviderState {
        *self.state.lock()
    }

    fn transition(&self, next: ProviderState) -> Result<(), FixtureError> {
        let mut state = self.state.lock();
        *state = state.transition(next)?;
        debug!(state = %next, "Provider state changed");
        Ok(())
    }

    async fn provision(
        &self,
        override_connection_string: Option<String>,
    ) -> Result<String, FixtureError> {
        let connection_string = match override_connection_string {
            Some(connection_string) => connection_string,
            None => self.start_container().await?,
        };
        let connection_string = self.connection_string.get_or_init(|| connection_string);
        info!(connection_string = %connection_string, "Using connection string");

        let mut conn =
            connection_factory::open_connection(self.factory.as_ref(), connection_string).await?;
        conn.close().await?;
        Ok(connection_string.clone())
    }

    async fn start_container(&self) -> Result<String, FixtureError> {
        let mut slot = self.container.lock().await;
        let mut container = self.builder.build()?;
        info!("Starting container");
        container.start().await?;
        let connection_string = container.connection_string();
        // Stored before the endpoint is checked so a started container is
        // always stopped on dispose.
        *slot = Some(container);
        Ok(connection_string?)
    }
}

#[async_trait]
impl DatabaseProvider for ContainerProvider {
    fn name(&self) -> &ProviderName {
        &self.name
    }

    fn factory(&self) -> &dyn DriverFactory {
        self.factory.as_ref()
    }

    fn connection_string(&self) -> Result<String, FixtureError> {
        if !self.state().is_initialized() {
            return Err(FixtureError::uninitialized(self.name.as_str()));
        }
        self.connection_string
            .get()
            .cloned()
            .ok_or_else(|| FixtureError::uninitialized(self.name.as_str()))
    }
}

#[async_trait]
impl AsyncLifetime for ContainerProvider {
    #[instrument(skip(self), fields(provider = %self.name))]
    async fn initialize(&self) -> Result<InitOutcome, FixtureError> {
        self.transition(ProviderState::Initializing)?;
        info!(factory = self.factory.name(), "Using provider");

        let variable = self.name.environment_variable();
        let override_connection_string = self.environment.var(&variable);
        if override_connection_string.is_some() {
            info!(variable = %variable, "Connection string override found, skipping container");
        }

        match self.provision(override_connection_string).await {
            Ok(connection_string) => {
                self.transition(ProviderState::Ready)?;
                Ok(InitOutcome::ready(connection_string))
            },
            Err(e) => {
                let outcome = InitOutcome::unavailable(&self.name, e.detail());
                warn!(error = %e, "Provider unavailable");
                self.transition(ProviderState::Inconclusive)?;
                Ok(outcome)
            },
        }
    }

    #[instrument(skip(self), fields(provider = %self.name))]
    async fn dispose(&self) -> Result<(), FixtureError> {
        self.transition(ProviderState::Disposing)?;
        let container = self.container.lock().await.take();
        let result = match container {
            Some(mut container) => {
                info!("Stopping container");
                container.stop().await.map_err(FixtureError::from)
            },
            None => {
                debug!("No container to stop");
                Ok(())
            },
        };
        self.transition(ProviderState::Disposed)?;
        result
    }
}
