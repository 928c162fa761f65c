//! Configuration loading
//!
//! Resolves database connection parameters and the table list. Values given
//! on the command line win over environment variables, which win over the
//! defaults. A .env file can be loaded first; it never overrides variables
//! already present in the process environment.

use crate::prelude::ModelgenError;
use std::{env, path::Path};
use tracing::{debug, error, trace, warn};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3306;

/// Connection values supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Resolve configuration from overrides and the process environment
    ///
    /// Expected variables:
    /// - DB_HOST (default: 127.0.0.1)
    /// - DB_PORT (default: 3306)
    /// - DB_NAME (required)
    /// - DB_USER (required)
    /// - DB_PASSWORD (required)
    pub fn from_env(overrides: &ConnectionOverrides) -> Result<Self, ModelgenError> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Resolve configuration from overrides and an arbitrary variable lookup
    pub fn resolve<F>(overrides: &ConnectionOverrides, lookup: F) -> Result<Self, ModelgenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Resolving database configuration");

        let host = pick(&overrides.host, &lookup, "DB_HOST").unwrap_or_else(|| {
            trace!("DB_HOST not set, using default");
            DEFAULT_HOST.to_string()
        });

        let port = match pick(&overrides.port, &lookup, "DB_PORT") {
            Some(port_str) => port_str.parse::<u16>().map_err(|e| {
                error!(port = ?port_str, error = ?e, "Invalid DB_PORT value");
                ModelgenError::Config("DB_PORT must be a valid port number".to_string())
            })?,
            None => {
                trace!("DB_PORT not set, using default");
                DEFAULT_PORT
            }
        };

        let database = require(&overrides.database, &lookup, "DB_NAME", "--dbname")?;
        let user = require(&overrides.user, &lookup, "DB_USER", "--dbuser")?;
        let password = require(&overrides.password, &lookup, "DB_PASSWORD", "--dbpassword")?;

        debug!(host = ?host, port = ?port, database = ?database, user = ?user, "Configuration loaded");

        Ok(Self {
            host,
            port,
            database,
            user,
            password,
        })
    }

    /// Build a MySQL connection URL with password redacted (for logs and errors)
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Load a .env file into the process environment if it exists
pub fn load_env_file(env_file: &Path) -> Result<(), ModelgenError> {
    if env_file.exists() {
        debug!(path = ?env_file, "Loading environment file");
        dotenvy::from_path(env_file).map_err(|e| {
            error!(path = ?env_file, error = ?e, "Failed to load environment file");
            ModelgenError::Config(format!("Failed to load {}: {}", env_file.display(), e))
        })?;
    } else {
        warn!(path = ?env_file, "Environment file not found, using existing environment");
    }

    Ok(())
}

/// Resolve the list of tables to generate from the override or TABLES
///
/// Entries are trimmed and empty entries are dropped. At least one table is
/// required.
pub fn resolve_tables<F>(
    overrides: Option<&[String]>,
    lookup: F,
) -> Result<Vec<String>, ModelgenError>
where
    F: Fn(&str) -> Option<String>,
{
    let from_flag = overrides
        .map(|tables| clean_tables(tables.iter().map(String::as_str)))
        .unwrap_or_default();
    let tables = if from_flag.is_empty() {
        lookup("TABLES")
            .map(|value| clean_tables(value.split(',')))
            .unwrap_or_default()
    } else {
        from_flag
    };

    if tables.is_empty() {
        error!("No tables given");
        return Err(ModelgenError::Config(
            "TABLES environment variable or --tables is required".to_string(),
        ));
    }

    debug!(tables = ?tables, "Tables resolved");
    Ok(tables)
}

fn clean_tables<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raw.into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn pick<F>(value: &Option<String>, lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    value
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| lookup(key).filter(|v| !v.is_empty()))
}

fn require<F>(
    value: &Option<String>,
    lookup: &F,
    key: &str,
    flag: &str,
) -> Result<String, ModelgenError>
where
    F: Fn(&str) -> Option<String>,
{
    pick(value, lookup, key).ok_or_else(|| {
        error!("{} environment variable is not set", key);
        ModelgenError::Config(format!("{} environment variable or {} is required", key, flag))
    })
}
