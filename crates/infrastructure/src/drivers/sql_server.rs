//! SQL Server driver adapter over tiberius
//!
//! Connection strings use the ADO.NET format. Options tiberius does not know,
//! such as `MultipleActiveResultSets`, are accepted and ignored by the wire
//! client.

use std::any::Any;

use application::ports::{ConnectionStringBuilder, DbConnection, DriverError, DriverFactory};
use async_trait::async_trait;
use domain::ConnectionState;
use tiberius::{Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, instrument};

use super::ado_builder::AdoConnectionStringBuilder;
use super::error::{map_tds_connect_error, map_tds_query_error};

const DRIVER_NAME: &str = "tiberius";

type TdsClient = Client<Compat<TcpStream>>;

/// Driver factory for SQL Server
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDriverFactory;

impl SqlServerDriverFactory {
    /// Create the factory
    pub const fn new() -> Self {
        Self
    }
}

impl DriverFactory for SqlServerDriverFactory {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn create_connection(&self) -> Box<dyn DbConnection> {
        Box::new(SqlServerConnection::new())
    }

    fn create_connection_string_builder(&self) -> Box<dyn ConnectionStringBuilder> {
        Box::new(AdoConnectionStringBuilder::new())
    }
}

/// Connection handle over a single tiberius client
#[derive(Default)]
pub struct SqlServerConnection {
    connection_string: String,
    client: Option<TdsClient>,
    broken: bool,
}

impl std::fmt::Debug for SqlServerConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlServerConnection")
            .field("open", &self.client.is_some())
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

impl SqlServerConnection {
    /// Create a closed handle without a connection string
    pub fn new() -> Self {
        Self::default()
    }

    /// The native client while open
    pub fn client_mut(&mut self) -> Option<&mut Client<Compat<TcpStream>>> {
        self.client.as_mut()
    }
}

#[async_trait]
impl DbConnection for SqlServerConnection {
    fn connection_string(&self) -> &str {
        &self.connection_string
    }

    fn set_connection_string(&mut self, connection_string: &str) {
        self.connection_string = connection_string.to_string();
    }

    fn state(&self) -> ConnectionState {
        if self.broken {
            ConnectionState::Broken
        } else if self.client.is_some() {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    #[instrument(skip(self), fields(driver = DRIVER_NAME))]
    async fn open(&mut self) -> Result<(), DriverError> {
        if self.client.is_some() {
            return Ok(());
        }
        let config = Config::from_ado_string(&self.connection_string)
            .map_err(|e| DriverError::InvalidConnectionString(e.to_string()))?;

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| DriverError::Connect(e.to_string()))?;
        tcp.set_nodelay(true)
            .map_err(|e| DriverError::Connect(e.to_string()))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(map_tds_connect_error)?;
        self.client = Some(client);
        self.broken = false;
        debug!("SQL Server connection opened");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.broken = false;
        match self.client.take() {
            Some(client) => client.close().await.map_err(map_tds_query_error),
            None => Ok(()),
        }
    }

    async fn ping(&mut self) -> Result<(), DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotOpen)?;
        let result = match client.simple_query("SELECT 1").await {
            Ok(stream) => stream.into_results().await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.broken = true;
            return Err(map_tds_query_error(e));
        }
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        let client = self.client.as_mut().ok_or(DriverError::NotOpen)?;
        let result = client
            .execute(sql, &[])
            .await
            .map_err(map_tds_query_error)?;
        Ok(result.total())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
