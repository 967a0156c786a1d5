use log::{debug, info};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, QueryTrait};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Used when `DATABASE_URL` is unset; `mode=rwc` creates the file on first run
pub const DEFAULT_DATABASE_URL: &str = "sqlite://presentation.sqlite?mode=rwc";

/// Log target carrying generated SQL
pub const SQL_LOG_TARGET: &str = "sql";

/// Custom error type for invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    /// Show the statements logged on the `sql` target
    pub sql_debug: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            sql_debug: true,
        }
    }
}

impl DbConfig {
    /// Reads `DATABASE_URL` and `SQL_DEBUG`, loading a `.env` file first if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.url);

        let sql_debug = match lookup("SQL_DEBUG") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ConfigError(format!("SQL_DEBUG must be a boolean, got {raw:?}")))?,
            None => defaults.sql_debug,
        };

        Ok(Self { url, sql_debug })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Opens the database and brings its schema up to date
pub async fn create_connection(config: &DbConfig) -> Result<DatabaseConnection, DbErr> {
    // Statements are logged once, by `log_sql`, not by the driver
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    info!("Connected to {}", config.url);
    Ok(db)
}

/// Logs the statement a query will run, rendered for the connection's backend.
/// Records go to the `sql` target at debug level; the binary's logger decides
/// whether they are shown.
pub fn log_sql<C, Q>(db: &C, query: &Q)
where
    C: ConnectionTrait,
    Q: QueryTrait,
{
    debug!(
        target: SQL_LOG_TARGET,
        "{}",
        query.build(db.get_database_backend())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DbConfig::default());
        assert!(config.sql_debug);
    }

    #[test]
    fn test_reads_url_and_flag() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SQL_DEBUG", "off"),
        ]))
        .unwrap();
        assert_eq!(config.url, "sqlite::memory:");
        assert!(!config.sql_debug);
    }

    #[test]
    fn test_blank_url_falls_back() {
        let config = DbConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_unrecognised_flag_is_rejected() {
        let result = DbConfig::from_lookup(lookup_from(&[("SQL_DEBUG", "maybe")]));
        assert_eq!(
            result,
            Err(ConfigError(
                "SQL_DEBUG must be a boolean, got \"maybe\"".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
