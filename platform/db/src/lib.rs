//! Connection settings and pool wiring for the HR store.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

pub const DEFAULT_DATABASE_URL: &str = "postgres://hr:hr@localhost:5432/hr";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("database connection failed: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub sql_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: default_max_connections(),
            sql_logging: false,
        }
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Reads `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_SQL_LOGGING`.
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let mut settings = Self::default();
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            settings.url = url;
        }
        if let Some(raw) = lookup("DB_MAX_CONNECTIONS") {
            settings.max_connections = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(DbError::InvalidSetting {
                    key: "DB_MAX_CONNECTIONS",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup("DB_SQL_LOGGING") {
            settings.sql_logging = matches!(raw.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(settings)
    }

    fn connect_options(&self) -> ConnectOptions {
        // Every connection to an in-memory SQLite database sees its own empty store.
        let max_connections = if self.url.contains(":memory:") {
            1
        } else {
            self.max_connections
        };
        let mut opts = ConnectOptions::new(self.url.clone());
        opts.max_connections(max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(self.sql_logging);
        opts
    }
}

/// Opens the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let pool = Database::connect(settings.connect_options()).await?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env() {
        let settings = DatabaseSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, DatabaseSettings::default());
    }

    #[test]
    fn env_overrides_defaults() {
        let settings = DatabaseSettings::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_SQL_LOGGING", "true"),
        ]))
        .unwrap();
        assert_eq!(settings.url, "sqlite::memory:");
        assert_eq!(settings.max_connections, 3);
        assert!(settings.sql_logging);
    }

    #[test]
    fn rejects_zero_connections() {
        let err = DatabaseSettings::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidSetting {
                key: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let pool = connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .unwrap();
        assert_eq!(
            pool.get_database_backend(),
            sea_orm::DatabaseBackend::Sqlite
        );
    }
}
