//! Per-backend settings.

use serde::{Deserialize, Serialize};

/// Image and credentials of a database container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSettings {
    /// Image tag (e.g., "16-alpine")
    pub tag: String,
    /// Database created at startup
    pub database: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl ContainerSettings {
    /// Defaults for the MySQL image
    pub fn mysql() -> Self {
        Self {
            tag: "8.1".to_string(),
            database: "test".to_string(),
            username: "test".to_string(),
            password: "test".to_string(),
        }
    }

    /// Defaults for the Postgres image
    pub fn postgres() -> Self {
        Self {
            tag: "16-alpine".to_string(),
            database: "test".to_string(),
            username: "test".to_string(),
            password: "test".to_string(),
        }
    }
}

/// SQL Server static provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlServerSettings {
    /// Connection string used when `SqlServerConnectionString` is unset
    pub default_connection_string: String,
}

impl Default for SqlServerSettings {
    fn default() -> Self {
        Self {
            default_connection_string:
                "Data Source=localhost;Initial Catalog=tempdb;Integrated Security=True"
                    .to_string(),
        }
    }
}
