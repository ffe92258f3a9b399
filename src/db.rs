use std::{path::Path, str::FromStr};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AppConfig;

/// Open the pool described by `config`, creating the database file if needed.
pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    if let Some(dir) = database_dir(&config.database_url) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create database directory {}", dir.display()))?;
    }

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse database url {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));
    if is_memory(&config.database_url) {
        // every connection to :memory: is a separate database
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options
        .connect_with(options)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

fn is_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn database_dir(url: &str) -> Option<&Path> {
    if is_memory(url) {
        return None;
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

#[cfg(test)]
mod db_tests {
    use super::*;

    #[test]
    fn database_dir_extracts_parent_of_file_url() {
        assert_eq!(
            database_dir("sqlite://data/foodlog.db?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(database_dir("sqlite:foodlog.db"), None);
        assert_eq!(database_dir("sqlite::memory:"), None);
        assert_eq!(database_dir("postgres://localhost/db"), None);
    }
}
