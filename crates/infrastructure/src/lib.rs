//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: sqlx and tiberius
//! database drivers, testcontainers-backed database containers, and process
//! environment access. Also wires the concrete MySQL, Postgres and SQL Server
//! providers used by integration suites.

pub mod adapters;
pub mod config;
pub mod containers;
pub mod drivers;
pub mod providers;
pub mod telemetry;

pub use adapters::{InMemoryEnvironment, ProcessEnvironment};
pub use config::{ContainerSettings, FixtureConfig, SqlServerSettings};
pub use containers::{DockerContainer, DockerContainerBuilder, MySqlEngine, PostgresEngine};
pub use drivers::{
    AdoConnectionStringBuilder, SqlServerConnection, SqlServerDriverFactory, SqlxConnection,
    SqlxDriverFactory, UrlConnectionStringBuilder, ensure_native_drivers_loaded,
    require_native_drivers,
};
pub use providers::{SqlServerOptions, SqlServerProvider, mysql_provider, postgres_provider};
pub use telemetry::init_test_tracing;
