//! SQL Server provider
//!
//! Resolves `SqlServerConnectionString` from the environment, falling back to
//! the configured default. No container is involved.

use std::sync::Arc;

use application::FixtureError;
use application::ports::{DbConnection, DriverFactory, EnvironmentPort};
use application::services::{
    AsyncLifetime, DatabaseProvider, StaticProvider, open_connection, with_option,
};
use async_trait::async_trait;
use domain::{InitOutcome, ProviderName};
use tracing::{debug, instrument};

use crate::config::SqlServerSettings;
use crate::drivers::SqlServerDriverFactory;

/// Environment variable holding the SQL Server connection string
pub const SQL_SERVER_CONNECTION_STRING_VARIABLE: &str = "SqlServerConnectionString";

const MULTIPLE_ACTIVE_RESULT_SETS: &str = "MultipleActiveResultSets";

/// Per-connection SQL Server options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlServerOptions {
    /// Allow several pending requests on one connection (MARS)
    pub multiple_active_result_sets: bool,
}

/// Statically configured SQL Server provider
#[derive(Debug)]
pub struct SqlServerProvider {
    inner: StaticProvider,
}

impl SqlServerProvider {
    /// Create a provider using the tiberius driver
    pub fn new(settings: &SqlServerSettings, environment: Arc<dyn EnvironmentPort>) -> Self {
        Self::with_factory(Arc::new(SqlServerDriverFactory::new()), settings, environment)
    }

    /// Create a provider using another driver factory
    pub fn with_factory(
        factory: Arc<dyn DriverFactory>,
        settings: &SqlServerSettings,
        environment: Arc<dyn EnvironmentPort>,
    ) -> Self {
        Self {
            inner: StaticProvider::new(
                ProviderName::sql_server(),
                factory,
                environment,
                SQL_SERVER_CONNECTION_STRING_VARIABLE,
                settings.default_connection_string.clone(),
            ),
        }
    }

    /// Resolved connection string with `options` applied
    pub fn connection_string_with(&self, options: SqlServerOptions) -> Result<String, FixtureError> {
        let connection_string = self.inner.connection_string()?;
        if !options.multiple_active_result_sets {
            return Ok(connection_string);
        }
        with_option(
            self.inner.factory(),
            &connection_string,
            MULTIPLE_ACTIVE_RESULT_SETS,
            "True",
        )
    }

    /// Open a connection with `options` applied
    #[instrument(skip(self))]
    pub async fn open_connection_with(
        &self,
        options: SqlServerOptions,
    ) -> Result<Box<dyn DbConnection>, FixtureError> {
        let connection_string = self.connection_string_with(options)?;
        debug!("Opening SQL Server connection");
        open_connection(self.inner.factory(), &connection_string).await
    }
}

#[async_trait]
impl DatabaseProvider for SqlServerProvider {
    fn name(&self) -> &ProviderName {
        self.inner.name()
    }

    fn factory(&self) -> &dyn DriverFactory {
        self.inner.factory()
    }

    fn connection_string(&self) -> Result<String, FixtureError> {
        self.inner.connection_string()
    }
}

#[async_trait]
impl AsyncLifetime for SqlServerProvider {
    async fn initialize(&self) -> Result<InitOutcome, FixtureError> {
        self.inner.initialize().await
    }

    async fn dispose(&self) -> Result<(), FixtureError> {
        self.inner.dispose().await
    }
}
