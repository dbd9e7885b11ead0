//! Provider and lifecycle traits
//!
//! A [`DatabaseProvider`] knows which driver to use and how to find its
//! backend. Providers that need setup or teardown also implement
//! [`AsyncLifetime`], which the fixture drives once per suite.

use async_trait::async_trait;
use domain::{DbParameter, InitOutcome, ParameterValue, ProviderName};

use super::connection_factory;
use crate::error::FixtureError;
use crate::ports::{DbConnection, DriverFactory, EnvironmentPort};

/// A database backend usable by test suites
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Backend name
    fn name(&self) -> &ProviderName;

    /// Driver used for every connection
    fn factory(&self) -> &dyn DriverFactory;

    /// Resolved connection string
    fn connection_string(&self) -> Result<String, FixtureError>;

    /// Open a fresh connection
    async fn open_connection(&self) -> Result<Box<dyn DbConnection>, FixtureError> {
        let connection_string = self.connection_string()?;
        connection_factory::open_connection(self.factory(), &connection_string).await
    }

    /// Create a fresh, unopened connection
    fn closed_connection(&self) -> Result<Box<dyn DbConnection>, FixtureError> {
        let connection_string = self.connection_string()?;
        connection_factory::closed_connection(self.factory(), &connection_string)
    }

    /// Create a driver parameter, mapping `None` to the null sentinel
    fn create_raw_parameter(&self, name: &str, value: Option<ParameterValue>) -> DbParameter {
        connection_factory::create_parameter(self.factory(), name, value)
    }
}

/// Setup and teardown hooks run once per suite
#[async_trait]
pub trait AsyncLifetime: Send + Sync {
    /// Make the provider usable
    ///
    /// Unavailability of the backend is reported as
    /// [`InitOutcome::Inconclusive`]; `Err` is reserved for misuse such as
    /// initializing twice.
    async fn initialize(&self) -> Result<InitOutcome, FixtureError>;

    /// Release everything `initialize` acquired
    async fn dispose(&self) -> Result<(), FixtureError>;
}

/// Value of the `key` environment variable, or `default` when unset
pub fn resolve_connection_string(
    environment: &dyn EnvironmentPort,
    key: &str,
    default: &str,
) -> String {
    environment.var(key).unwrap_or_else(|| default.to_string())
}
