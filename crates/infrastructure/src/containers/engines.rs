//! Engines backed by testcontainers-modules images.

use testcontainers::{ContainerRequest, ImageExt};
use testcontainers_modules::{mysql::Mysql, postgres::Postgres};

use super::DatabaseEngine;
use crate::config::ContainerSettings;

/// MySQL server image
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEngine;

impl DatabaseEngine for MySqlEngine {
    type Image = Mysql;

    const NAME: &'static str = "mysql";
    const SCHEME: &'static str = "mysql";
    const PORT: u16 = 3306;

    fn request(settings: &ContainerSettings) -> ContainerRequest<Mysql> {
        // The image creates this user with full rights on MYSQL_DATABASE
        Mysql::default()
            .with_tag(&settings.tag)
            .with_env_var("MYSQL_DATABASE", &settings.database)
            .with_env_var("MYSQL_USER", &settings.username)
            .with_env_var("MYSQL_PASSWORD", &settings.password)
    }
}

/// PostgreSQL server image
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresEngine;

impl DatabaseEngine for PostgresEngine {
    type Image = Postgres;

    const NAME: &'static str = "postgres";
    const SCHEME: &'static str = "postgres";
    const PORT: u16 = 5432;

    fn request(settings: &ContainerSettings) -> ContainerRequest<Postgres> {
        Postgres::default()
            .with_db_name(&settings.database)
            .with_user(&settings.username)
            .with_password(&settings.password)
            .with_tag(&settings.tag)
    }
}
