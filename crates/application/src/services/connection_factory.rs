//! Raw connection creation
//!
//! Every connection handed to a test goes through these functions. A handle
//! that does not report the state its operation guarantees indicates a driver
//! bug and fails hard with [`FixtureError::InvalidConnectionState`].

use domain::{ConnectionState, DbParameter, ParameterValue};
use tracing::{debug, instrument};

use crate::error::FixtureError;
use crate::ports::{DbConnection, DriverFactory};

/// Create a connection, open it, and check that it reports `Open`
#[instrument(skip_all, fields(driver = factory.name()))]
pub async fn open_connection(
    factory: &dyn DriverFactory,
    connection_string: &str,
) -> Result<Box<dyn DbConnection>, FixtureError> {
    let mut conn = factory.create_connection();
    conn.set_connection_string(connection_string);
    conn.open().await?;
    expect_state(conn.as_ref(), ConnectionState::Open)?;
    debug!("Connection opened");
    Ok(conn)
}

/// Create a connection without opening it and check that it reports `Closed`
pub fn closed_connection(
    factory: &dyn DriverFactory,
    connection_string: &str,
) -> Result<Box<dyn DbConnection>, FixtureError> {
    let mut conn = factory.create_connection();
    conn.set_connection_string(connection_string);
    expect_state(conn.as_ref(), ConnectionState::Closed)?;
    Ok(conn)
}

/// Create a named driver parameter, mapping `None` to the null sentinel
pub fn create_parameter(
    factory: &dyn DriverFactory,
    name: &str,
    value: Option<ParameterValue>,
) -> DbParameter {
    let mut parameter = factory.create_parameter();
    parameter.name = name.to_string();
    parameter.value = value.unwrap_or(ParameterValue::Null);
    parameter
}

/// Rewrite `connection_string` through the driver's builder with one option set
///
/// Pure string transformation; nothing is opened.
pub fn with_option(
    factory: &dyn DriverFactory,
    connection_string: &str,
    key: &str,
    value: &str,
) -> Result<String, FixtureError> {
    let mut builder = factory.create_connection_string_builder();
    builder.set_connection_string(connection_string)?;
    builder.set(key, value)?;
    Ok(builder.connection_string())
}

fn expect_state(conn: &dyn DbConnection, expected: ConnectionState) -> Result<(), FixtureError> {
    let actual = conn.state();
    if actual == expected {
        Ok(())
    } else {
        Err(FixtureError::InvalidConnectionState { expected, actual })
    }
}
