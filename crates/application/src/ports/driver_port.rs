//! Database driver port
//!
//! A [`DriverFactory`] is the single entry point to a database driver: it
//! creates connection handles, parameters, and connection-string builders.
//! Connection handles follow a create → configure → open → close lifecycle
//! and report their [`ConnectionState`] at every step.

use std::any::Any;

use async_trait::async_trait;
use domain::{ConnectionState, DbParameter};
use thiserror::Error;

/// Errors reported by database drivers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// Connection string could not be parsed
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Server could not be reached or rejected the login
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Operation requires an open connection
    #[error("Connection is not open")]
    NotOpen,

    /// Statement referenced an object that does not exist
    #[error("Object does not exist: {0}")]
    MissingObject(String),

    /// Statement failed
    #[error("Query failed: {0}")]
    Query(String),
}

impl DriverError {
    /// Message of the underlying failure without the category prefix
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidConnectionString(msg)
            | Self::Connect(msg)
            | Self::MissingObject(msg)
            | Self::Query(msg) => msg.clone(),
            Self::NotOpen => self.to_string(),
        }
    }
}

/// Factory for driver objects of one database backend
pub trait DriverFactory: Send + Sync {
    /// Identity of the driver, used for diagnostics
    fn name(&self) -> &str;

    /// Create a new, closed connection handle without a connection string
    fn create_connection(&self) -> Box<dyn DbConnection>;

    /// Create an unnamed parameter holding the null sentinel
    fn create_parameter(&self) -> DbParameter {
        DbParameter::default()
    }

    /// Create an empty connection-string builder for this backend
    fn create_connection_string_builder(&self) -> Box<dyn ConnectionStringBuilder>;
}

/// A single driver connection handle
///
/// Handles are not thread-safe; they are used from one task at a time.
#[async_trait]
pub trait DbConnection: Send {
    /// Connection string the handle will use on [`DbConnection::open`]
    fn connection_string(&self) -> &str;

    /// Set the connection string; only valid while closed
    fn set_connection_string(&mut self, connection_string: &str);

    /// Current state of the handle
    fn state(&self) -> ConnectionState;

    /// Connect to the server
    async fn open(&mut self) -> Result<(), DriverError>;

    /// Disconnect; closing a closed handle succeeds
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Round-trip to the server
    async fn ping(&mut self) -> Result<(), DriverError>;

    /// Execute a statement and return the number of affected rows
    async fn execute(&mut self, sql: &str) -> Result<u64, DriverError>;

    /// Access the concrete driver handle
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Backend-specific connection-string editor
pub trait ConnectionStringBuilder: Send + std::fmt::Debug {
    /// Replace the builder's contents by parsing a connection string
    fn set_connection_string(&mut self, connection_string: &str) -> Result<(), DriverError>;

    /// Render the current contents as a connection string
    fn connection_string(&self) -> String;

    /// Read an option
    fn get(&self, key: &str) -> Option<String>;

    /// Set an option, replacing any existing value for the same key
    fn set(&mut self, key: &str, value: &str) -> Result<(), DriverError>;

    /// Remove an option
    fn remove(&mut self, key: &str) -> bool;
}
