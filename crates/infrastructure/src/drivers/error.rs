//! Shared error mapping for driver adapters

use application::ports::DriverError;

/// SQLSTATE codes reported when a statement names an absent object
///
/// `42P01` undefined table and `42704` undefined object (Postgres), `42S02`
/// unknown table (MySQL).
const MISSING_OBJECT_SQLSTATES: [&str; 3] = ["42P01", "42704", "42S02"];

/// SQL Server error numbers for an absent object
///
/// `208` invalid object name, `3701` cannot drop because it does not exist.
const MISSING_OBJECT_SQL_SERVER_CODES: [u32; 2] = [208, 3701];

/// Map a sqlx error raised while connecting
pub fn map_sqlx_connect_error(e: sqlx::Error) -> DriverError {
    match e {
        sqlx::Error::Configuration(cause) => DriverError::InvalidConnectionString(cause.to_string()),
        other => DriverError::Connect(other.to_string()),
    }
}

/// Map a sqlx error raised by a statement
pub fn map_sqlx_query_error(e: sqlx::Error) -> DriverError {
    match e {
        sqlx::Error::Database(db_err) => {
            let missing = db_err
                .code()
                .is_some_and(|code| MISSING_OBJECT_SQLSTATES.contains(&&*code));
            if missing {
                DriverError::MissingObject(db_err.message().to_string())
            } else {
                DriverError::Query(db_err.to_string())
            }
        },
        sqlx::Error::Io(io) => DriverError::Connect(io.to_string()),
        other => DriverError::Query(other.to_string()),
    }
}

/// Map a tiberius error raised while connecting
pub fn map_tds_connect_error(e: tiberius::error::Error) -> DriverError {
    match e {
        tiberius::error::Error::Conversion(cause) => {
            DriverError::InvalidConnectionString(cause.to_string())
        },
        other => DriverError::Connect(other.to_string()),
    }
}

/// Map a tiberius error raised by a statement
pub fn map_tds_query_error(e: tiberius::error::Error) -> DriverError {
    match e {
        tiberius::error::Error::Server(token)
            if MISSING_OBJECT_SQL_SERVER_CODES.contains(&token.code()) =>
        {
            DriverError::MissingObject(token.message().to_string())
        },
        tiberius::error::Error::Io { message, .. } => DriverError::Connect(message),
        other => DriverError::Query(other.to_string()),
    }
}
