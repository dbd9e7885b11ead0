//! Configuration-only provider
//!
//! Resolves its connection string from one environment variable with a
//! hard-coded fallback. Used for backends assumed to be always reachable,
//! such as a local default instance. Resolution performs no I/O beyond the
//! environment lookup and may be repeated.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{InitOutcome, ProviderName};
use tracing::{info, instrument};

use super::provider::{AsyncLifetime, DatabaseProvider, resolve_connection_string};
use crate::error::FixtureError;
use crate::ports::{DriverFactory, EnvironmentPort};

/// Provider whose connection string comes from configuration alone
pub struct StaticProvider {
    name: ProviderName,
    factory: Arc<dyn DriverFactory>,
    environment: Arc<dyn EnvironmentPort>,
    variable: String,
    default_connection_string: String,
}

impl std::fmt::Debug for StaticProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticProvider")
            .field("name", &self.name)
            .field("factory", &self.factory.name())
            .field("variable", &self.variable)
            .field("default_connection_string", &self.default_connection_string)
            .finish_non_exhaustive()
    }
}

impl StaticProvider {
    /// Create a provider reading `variable`, falling back to
    /// `default_connection_string`
    pub fn new(
        name: ProviderName,
        factory: Arc<dyn DriverFactory>,
        environment: Arc<dyn EnvironmentPort>,
        variable: impl Into<String>,
        default_connection_string: impl Into<String>,
    ) -> Self {
        Self {
            name,
            factory,
            environment,
            variable: variable.into(),
            default_connection_string: default_connection_string.into(),
        }
    }

    /// Environment variable consulted first
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

#[async_trait]
impl DatabaseProvider for StaticProvider {
    fn name(&self) -> &ProviderName {
        &self.name
    }

    fn factory(&self) -> &dyn DriverFactory {
        self.factory.as_ref()
    }

    fn connection_string(&self) -> Result<String, FixtureError> {
        Ok(resolve_connection_string(
            self.environment.as_ref(),
            &self.variable,
            &self.default_connection_string,
        ))
    }
}

#[async_trait]
impl AsyncLifetime for StaticProvider {
    #[instrument(skip(self), fields(provider = %self.name))]
    async fn initialize(&self) -> Result<InitOutcome, FixtureError> {
        let connection_string = self.connection_string()?;
        info!(
            factory = self.factory.name(),
            connection_string = %connection_string,
            "Using static provider"
        );
        Ok(InitOutcome::ready(connection_string))
    }

    async fn dispose(&self) -> Result<(), FixtureError> {
        Ok(())
    }
}
