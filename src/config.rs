//! Connection configuration for db-select.
//!
//! Each database key names a slot of prefixed variables (`DB_{KEY}_HOST`,
//! `DB_{KEY}_PORT`, `DB_{KEY}_USER`, `DB_{KEY}_PASSWORD`, `DB_{KEY}_NAME`).
//! Values are read from a [`ConfigSource`], which is the process environment
//! unless the caller injects something else.

use crate::error::{Result, SelectError};
use std::collections::HashMap;
use std::env::VarError;
use std::fmt;
use std::path::Path;

/// Port used when `DB_{KEY}_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3306;

/// A key-value source for configuration lookups.
pub trait ConfigSource: Send + Sync {
    /// Returns the value of `name`, `Ok(None)` if it is not set.
    fn get(&self, name: &str) -> Result<Option<String>>;
}

/// Reads configuration from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, name: &str) -> Result<Option<String>> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e @ VarError::NotUnicode(_)) => Err(SelectError::config(format!(
                "Failed to load database config: {name}: {e}"
            ))),
        }
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(HashMap::get(self, name).cloned())
    }
}

/// Database connection configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Database user.
    pub user: String,

    /// Database password.
    pub password: String,

    /// Database name.
    pub database: String,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectionConfig {
    /// Converts the connection config to a `mysql://` connection string.
    pub fn to_connection_string(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }

    /// Returns a display-safe string (no password) for log output.
    pub fn display_string(&self) -> String {
        format!(
            "{} @ {}:{} as {}",
            self.database, self.host, self.port, self.user
        )
    }
}

/// Returns the variable name for `field` in the slot of `db_key`.
pub fn env_var_name(db_key: &str, field: &str) -> String {
    format!("DB_{}_{}", db_key.to_uppercase(), field)
}

/// Loads the connection config for `db_key` from the process environment.
pub fn load_db_config(db_key: &str) -> Result<ConnectionConfig> {
    load_db_config_from(&EnvSource, db_key)
}

/// Loads the connection config for `db_key` from `source`.
///
/// The port is parsed before the presence check, so a malformed port is
/// reported even when other variables are missing too.
pub fn load_db_config_from(source: &dyn ConfigSource, db_key: &str) -> Result<ConnectionConfig> {
    let lookup = |field: &str| source.get(&env_var_name(db_key, field));

    let host = lookup("HOST")?;
    let port = match lookup("PORT")? {
        Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
            SelectError::config(format!(
                "Invalid port value for database '{db_key}'. Port must be an integer."
            ))
        })?,
        None => DEFAULT_PORT,
    };
    let user = lookup("USER")?;
    let password = lookup("PASSWORD")?;
    let database = lookup("NAME")?;

    match (host, user, password, database) {
        (Some(host), Some(user), Some(password), Some(database)) => Ok(ConnectionConfig {
            host,
            port,
            user,
            password,
            database,
        }),
        _ => Err(SelectError::config(format!(
            "Missing environment variables for database '{db_key}'"
        ))),
    }
}

/// Loads variables from a `.env` file into the process environment.
///
/// With no path, searches the current directory and its parents. A missing
/// default `.env` is not an error; a missing explicit path is.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    let outcome = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) if path.is_none() && e.not_found() => Ok(()),
        Err(e) => Err(SelectError::config(format!(
            "Failed to load database config: {e}"
        ))),
    }
}
