//! Concrete providers
//!
//! MySQL and Postgres fall back to a disposable container when their
//! `DapperTests_{Name}_ConnectionString` override is unset. SQL Server is
//! assumed to be reachable and resolves its connection string statically.

mod sql_server;

use std::sync::Arc;

use application::ports::EnvironmentPort;
use application::services::ContainerProvider;
use domain::ProviderName;
use sqlx::{MySql, Postgres};

use crate::config::ContainerSettings;
use crate::containers::{DockerContainerBuilder, MySqlEngine, PostgresEngine};
use crate::drivers::SqlxDriverFactory;

pub use sql_server::{SQL_SERVER_CONNECTION_STRING_VARIABLE, SqlServerOptions, SqlServerProvider};

/// Container-backed MySQL provider
pub fn mysql_provider(
    settings: &ContainerSettings,
    environment: Arc<dyn EnvironmentPort>,
) -> ContainerProvider {
    ContainerProvider::new(
        ProviderName::mysql(),
        Arc::new(SqlxDriverFactory::<MySql>::new()),
        Arc::new(DockerContainerBuilder::<MySqlEngine>::new(settings.clone())),
        environment,
    )
}

/// Container-backed Postgres provider
pub fn postgres_provider(
    settings: &ContainerSettings,
    environment: Arc<dyn EnvironmentPort>,
) -> ContainerProvider {
    ContainerProvider::new(
        ProviderName::postgresql(),
        Arc::new(SqlxDriverFactory::<Postgres>::new()),
        Arc::new(DockerContainerBuilder::<PostgresEngine>::new(settings.clone())),
        environment,
    )
}
