//! sqlx driver adapter
//!
//! One generic factory and connection serve every sqlx backend. Backends
//! differ only in their name, how affected rows are read from a query
//! result, and whether process-wide registration must have happened first.

use std::any::Any as StdAny;
use std::marker::PhantomData;

use application::ports::{ConnectionStringBuilder, DbConnection, DriverError, DriverFactory};
use async_trait::async_trait;
use domain::ConnectionState;
use sqlx::{Any, Database, Executor, MySql, Postgres};
use tracing::{debug, instrument};

use super::error::{map_sqlx_connect_error, map_sqlx_query_error};
use super::native::require_native_drivers;
use super::url_builder::UrlConnectionStringBuilder;

/// A sqlx database usable as a fixture backend
pub trait SqlxBackend: Database {
    /// Driver identity reported by the factory
    const DRIVER_NAME: &'static str;

    /// Number of rows a statement affected
    fn rows_affected(result: &Self::QueryResult) -> u64;

    /// Fail if process-wide setup this backend needs has not run
    fn check_ready() -> Result<(), DriverError> {
        Ok(())
    }
}

impl SqlxBackend for MySql {
    const DRIVER_NAME: &'static str = "sqlx-mysql";

    fn rows_affected(result: &Self::QueryResult) -> u64 {
        result.rows_affected()
    }
}

impl SqlxBackend for Postgres {
    const DRIVER_NAME: &'static str = "sqlx-postgres";

    fn rows_affected(result: &Self::QueryResult) -> u64 {
        result.rows_affected()
    }
}

impl SqlxBackend for Any {
    const DRIVER_NAME: &'static str = "sqlx-any";

    fn rows_affected(result: &Self::QueryResult) -> u64 {
        result.rows_affected()
    }

    fn check_ready() -> Result<(), DriverError> {
        require_native_drivers()
    }
}

/// Driver factory for a sqlx backend
pub struct SqlxDriverFactory<DB> {
    _db: PhantomData<fn() -> DB>,
}

impl<DB: SqlxBackend> SqlxDriverFactory<DB> {
    /// Create the factory
    pub const fn new() -> Self {
        Self { _db: PhantomData }
    }
}

impl<DB: SqlxBackend> Default for SqlxDriverFactory<DB> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DB: SqlxBackend> std::fmt::Debug for SqlxDriverFactory<DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxDriverFactory")
            .field("driver", &DB::DRIVER_NAME)
            .finish()
    }
}

impl<DB> DriverFactory for SqlxDriverFactory<DB>
where
    DB: SqlxBackend,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
{
    fn name(&self) -> &str {
        DB::DRIVER_NAME
    }

    fn create_connection(&self) -> Box<dyn DbConnection> {
        Box::new(SqlxConnection::<DB>::new())
    }

    fn create_connection_string_builder(&self) -> Box<dyn ConnectionStringBuilder> {
        Box::new(UrlConnectionStringBuilder::new())
    }
}

/// Connection handle over a single sqlx connection
///
/// Suites that need the native connection reach it through
/// [`DbConnection::as_any_mut`] and [`SqlxConnection::inner_mut`].
pub struct SqlxConnection<DB: Database> {
    connection_string: String,
    inner: Option<DB::Connection>,
    broken: bool,
}

impl<DB: Database> SqlxConnection<DB> {
    /// Create a closed handle without a connection string
    pub const fn new() -> Self {
        Self {
            connection_string: String::new(),
            inner: None,
            broken: false,
        }
    }

    /// The native connection while open
    pub fn inner_mut(&mut self) -> Option<&mut DB::Connection> {
        self.inner.as_mut()
    }
}

impl<DB: Database> Default for SqlxConnection<DB> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DB: Database> std::fmt::Debug for SqlxConnection<DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxConnection")
            .field("database", &DB::NAME)
            .field("open", &self.inner.is_some())
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<DB> DbConnection for SqlxConnection<DB>
where
    DB: SqlxBackend,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
{
    fn connection_string(&self) -> &str {
        &self.connection_string
    }

    fn set_connection_string(&mut self, connection_string: &str) {
        self.connection_string = connection_string.to_string();
    }

    fn state(&self) -> ConnectionState {
        if self.broken {
            ConnectionState::Broken
        } else if self.inner.is_some() {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    #[instrument(skip(self), fields(driver = DB::DRIVER_NAME))]
    async fn open(&mut self) -> Result<(), DriverError> {
        if self.inner.is_some() {
            return Ok(());
        }
        DB::check_ready()?;
        let conn = <DB::Connection as sqlx::Connection>::connect(&self.connection_string)
            .await
            .map_err(map_sqlx_connect_error)?;
        self.inner = Some(conn);
        self.broken = false;
        debug!("sqlx connection opened");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.broken = false;
        match self.inner.take() {
            Some(conn) => sqlx::Connection::close(conn)
                .await
                .map_err(map_sqlx_query_error),
            None => Ok(()),
        }
    }

    async fn ping(&mut self) -> Result<(), DriverError> {
        let conn = self.inner.as_mut().ok_or(DriverError::NotOpen)?;
        if let Err(e) = sqlx::Connection::ping(conn).await {
            self.broken = true;
            return Err(map_sqlx_query_error(e));
        }
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        let conn = self.inner.as_mut().ok_or(DriverError::NotOpen)?;
        let result = Executor::execute(&mut *conn, sql)
            .await
            .map_err(map_sqlx_query_error)?;
        Ok(DB::rows_affected(&result))
    }

    fn as_any_mut(&mut self) -> &mut dyn StdAny {
        self
    }
}
