//! Database driver adapters
//!
//! - `sqlx_driver`: MySQL, Postgres and `Any` through one generic sqlx adapter
//! - `sql_server`: SQL Server through tiberius
//! - `url_builder` / `ado_builder`: connection-string editors per syntax
//! - `native`: process-wide driver registration

mod ado_builder;
mod error;
mod native;
mod sql_server;
mod sqlx_driver;
mod url_builder;

pub use ado_builder::AdoConnectionStringBuilder;
pub use error::{
    map_sqlx_connect_error, map_sqlx_query_error, map_tds_connect_error, map_tds_query_error,
};
pub use native::{ANY_DRIVERS, ensure_native_drivers_loaded, require_native_drivers};
pub use sql_server::{SqlServerConnection, SqlServerDriverFactory};
pub use sqlx_driver::{SqlxBackend, SqlxConnection, SqlxDriverFactory};
pub use url_builder::UrlConnectionStringBuilder;
