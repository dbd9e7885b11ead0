//! Per-suite connection cache
//!
//! A [`TestBase`] opens at most one connection from its provider, on first
//! use, and hands out the same handle until disposed. It belongs to a single
//! suite instance and is never shared.

use std::sync::Arc;

use tracing::debug;

use super::provider::DatabaseProvider;
use crate::error::FixtureError;
use crate::ports::DbConnection;

/// Lazily opened connection bound to one provider
pub struct TestBase<P> {
    provider: Arc<P>,
    connection: Option<Box<dyn DbConnection>>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for TestBase<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestBase")
            .field("provider", &self.provider)
            .field(
                "connection",
                &self.connection.as_ref().map(|c| c.state()),
            )
            .finish()
    }
}

impl<P: DatabaseProvider> TestBase<P> {
    /// Create a cache over `provider`; nothing is opened yet
    pub const fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            connection: None,
        }
    }

    /// The provider connections come from
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The cached connection, opened on first access
    pub async fn connection(&mut self) -> Result<&mut dyn DbConnection, FixtureError> {
        let conn = match self.connection.take() {
            Some(conn) => conn,
            None => {
                debug!(provider = %self.provider.name(), "Opening cached connection");
                self.provider.open_connection().await?
            },
        };
        Ok(self.connection.insert(conn).as_mut())
    }

    /// Check if the cached connection has been opened
    pub const fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    /// A fresh open connection, bypassing the cache
    pub async fn open_connection(&self) -> Result<Box<dyn DbConnection>, FixtureError> {
        self.provider.open_connection().await
    }

    /// A fresh unopened connection, bypassing the cache
    pub fn closed_connection(&self) -> Result<Box<dyn DbConnection>, FixtureError> {
        self.provider.closed_connection()
    }

    /// Release the cached connection
    ///
    /// Never fails, including when the test already closed the handle, and
    /// is a no-op when called again.
    pub async fn dispose(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            if let Err(e) = conn.close().await {
                debug!(error = %e, "Ignoring error while closing cached connection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{DriverError, DriverFactory};
    use crate::services::StaticProvider;
    use crate::testing::{FakeBehavior, FakeConnection, FakeDriverFactory, MapEnvironment};
    use domain::{ConnectionState, ProviderName};

    fn base_with(factory: FakeDriverFactory) -> (TestBase<StaticProvider>, Arc<FakeDriverFactory>) {
        let factory = Arc::new(factory);
        let provider = StaticProvider::new(
            ProviderName::sql_server(),
            Arc::clone(&factory) as Arc<dyn DriverFactory>,
            Arc::new(MapEnvironment::default()),
            "SqlServerConnectionString",
            "Server=fake;",
        );
        (TestBase::new(Arc::new(provider)), factory)
    }

    fn connection_id(conn: &mut dyn DbConnection) -> usize {
        conn.as_any_mut()
            .downcast_mut::<FakeConnection>()
            .map(|c| c.id)
            .unwrap()
    }

    #[tokio::test]
    async fn nothing_is_opened_until_first_access() {
        let (base, factory) = base_with(FakeDriverFactory::new());

        assert!(!base.has_connection());
        assert_eq!(factory.counters.created(), 0);
    }

    #[tokio::test]
    async fn second_access_returns_same_handle() {
        let (mut base, factory) = base_with(FakeDriverFactory::new());

        let first = connection_id(base.connection().await.unwrap());
        let second = connection_id(base.connection().await.unwrap());

        assert_eq!(first, second);
        assert_eq!(factory.counters.opened(), 1);
        assert_eq!(base.connection().await.unwrap().state(), ConnectionState::Open);
    }

    #[tokio::test]
    async fn dispose_closes_once_and_is_idempotent() {
        let (mut base, factory) = base_with(FakeDriverFactory::new());
        base.connection().await.unwrap();

        base.dispose().await;
        base.dispose().await;

        assert_eq!(factory.counters.closed(), 1);
        assert!(!base.has_connection());
    }

    #[tokio::test]
    async fn dispose_tolerates_connection_closed_by_test() {
        let (mut base, factory) = base_with(FakeDriverFactory::new());
        base.connection().await.unwrap().close().await.unwrap();

        base.dispose().await;

        assert_eq!(factory.counters.closed(), 1);
    }

    #[tokio::test]
    async fn dispose_swallows_close_errors() {
        let (mut base, _) = base_with(FakeDriverFactory::with_behavior(FakeBehavior {
            close_error: Some(DriverError::Query("socket gone".into())),
            ..FakeBehavior::default()
        }));
        base.connection().await.unwrap();

        base.dispose().await;

        assert!(!base.has_connection());
    }

    #[tokio::test]
    async fn access_after_dispose_opens_new_handle() {
        let (mut base, factory) = base_with(FakeDriverFactory::new());
        let first = connection_id(base.connection().await.unwrap());
        base.dispose().await;

        let second = connection_id(base.connection().await.unwrap());

        assert_ne!(first, second);
        assert_eq!(factory.counters.opened(), 2);
    }

    #[tokio::test]
    async fn pass_through_connections_bypass_cache() {
        let (mut base, factory) = base_with(FakeDriverFactory::new());
        let cached = connection_id(base.connection().await.unwrap());

        let mut fresh = base.open_connection().await.unwrap();
        let closed = base.closed_connection().unwrap();

        assert_ne!(connection_id(fresh.as_mut()), cached);
        assert_eq!(closed.state(), ConnectionState::Closed);
        assert_eq!(factory.counters.created(), 3);
    }

    #[tokio::test]
    async fn open_failure_is_not_cached() {
        let (mut base, _) = base_with(FakeDriverFactory::with_behavior(FakeBehavior {
            open_error: Some(DriverError::Connect("refused".into())),
            ..FakeBehavior::default()
        }));

        assert!(base.connection().await.is_err());
        assert!(!base.has_connection());
    }
}
