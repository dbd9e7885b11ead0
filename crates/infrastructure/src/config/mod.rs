//! Fixture configuration
//!
//! Layered like the rest of the workspace:
//! 1. built-in defaults
//! 2. optional `fixtures.toml` in the working directory
//! 3. environment variables prefixed `FIXTURES`, nested with `__`
//!    (e.g. `FIXTURES__POSTGRES__TAG=15-alpine`)
//!
//! The `DapperTests_{Name}_ConnectionString` overrides are not part of this
//! configuration. Providers read them verbatim through the environment port.

mod container;

use std::path::Path;

use application::FixtureError;
use config::builder::{ConfigBuilder, DefaultState};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use container::{ContainerSettings, SqlServerSettings};

/// Name of the optional configuration file, without extension
pub const CONFIG_FILE: &str = "fixtures";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "FIXTURES";

const DEFAULT_LOG_FILTER: &str = "info,testcontainers=warn";

/// Settings for every fixture backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// MySQL container settings
    pub mysql: ContainerSettings,
    /// Postgres container settings
    pub postgres: ContainerSettings,
    /// SQL Server static provider settings
    pub sql_server: SqlServerSettings,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            mysql: ContainerSettings::mysql(),
            postgres: ContainerSettings::postgres(),
            sql_server: SqlServerSettings::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl FixtureConfig {
    /// Load configuration from defaults, `fixtures.toml` and environment
    pub fn load() -> Result<Self, FixtureError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from defaults, the file at `path` and environment
    ///
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, FixtureError> {
        let config = Self::with_defaults()
            .and_then(|builder| {
                builder
                    .add_source(config::File::from(path).required(false))
                    .add_source(
                        config::Environment::with_prefix(ENV_PREFIX)
                            .separator("__")
                            .try_parsing(true),
                    )
                    .build()
            })
            .and_then(|built| built.try_deserialize::<Self>())
            .map_err(configuration_error)?;
        debug!(
            path = %path.display(),
            mysql_tag = %config.mysql.tag,
            postgres_tag = %config.postgres.tag,
            "Fixture configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from TOML text layered over the defaults
    pub fn from_toml(contents: &str) -> Result<Self, FixtureError> {
        Self::with_defaults()
            .and_then(|builder| {
                builder
                    .add_source(config::File::from_str(contents, config::FileFormat::Toml))
                    .build()
            })
            .and_then(|built| built.try_deserialize())
            .map_err(configuration_error)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder();
        for (section, settings) in [("mysql", &defaults.mysql), ("postgres", &defaults.postgres)] {
            builder = builder
                .set_default(format!("{section}.tag"), settings.tag.clone())?
                .set_default(format!("{section}.database"), settings.database.clone())?
                .set_default(format!("{section}.username"), settings.username.clone())?
                .set_default(format!("{section}.password"), settings.password.clone())?;
        }
        builder
            .set_default(
                "sql_server.default_connection_string",
                defaults.sql_server.default_connection_string,
            )?
            .set_default("log_filter", defaults.log_filter)
    }
}

fn configuration_error(e: config::ConfigError) -> FixtureError {
    FixtureError::Configuration(e.to_string())
}
