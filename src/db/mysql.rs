//! MySQL database client implementation.
//!
//! Provides `MySqlClient`, a single-connection client for MySQL-compatible
//! servers built on sqlx.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, Connector, DatabaseClient, QueryResult, Row, Value};
use crate::error::{Result, SelectError};
use async_trait::async_trait;
use sqlx::mysql::{MySqlColumn, MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column as _, Connection as _, Executor as _, Row as _, Statement as _, TypeInfo as _};
use std::time::Instant;
use tracing::{debug, warn};

/// MySQL database client owning exactly one connection.
#[derive(Debug)]
pub struct MySqlClient {
    conn: Option<MySqlConnection>,
}

impl MySqlClient {
    /// Opens a new connection using the given configuration.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        debug!("Connecting to {}", config.display_string());

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| map_connection_error(e, config))?;

        debug!("Successfully connected to database");
        Ok(Self { conn: Some(conn) })
    }

    fn connection(&mut self) -> Result<&mut MySqlConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| SelectError::driver("Connection is already closed"))
    }
}

#[async_trait]
impl DatabaseClient for MySqlClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let conn = self.connection()?;
        let start = Instant::now();

        // A plain &str carries no arguments, so sqlx sends it over the text
        // protocol: temporal and decimal values arrive as text.
        let result: Vec<MySqlRow> = (&mut *conn).fetch_all(sql).await?;

        // Column metadata rides along with the rows. Only an empty result
        // needs the extra round trip to describe its columns.
        let columns: Vec<ColumnInfo> = match result.first() {
            Some(first) => column_info(first.columns()),
            None => column_info((&mut *conn).prepare(sql).await?.columns()),
        };

        let rows = result.iter().map(convert_row).collect::<Result<Vec<Row>>>()?;

        Ok(QueryResult::with_data(columns, rows).with_execution_time(start.elapsed()))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
            debug!("Connection closed");
        } else {
            warn!("close() called on a connection that is already closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}

/// Connector that opens a fresh `MySqlClient` per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
        let client = MySqlClient::connect(config).await?;
        Ok(Box::new(client))
    }
}

fn column_info(columns: &[MySqlColumn]) -> Vec<ColumnInfo> {
    columns
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect()
}

/// Converts a text-protocol MySqlRow to our Row type.
fn convert_row(row: &MySqlRow) -> Result<Row> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a MySqlRow to our Value type.
fn convert_value(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value> {
    let type_name = type_name.to_uppercase();

    if is_binary_type(&type_name) {
        let bytes: Option<Vec<u8>> = row.try_get_unchecked(index)?;
        return Ok(bytes.map(Value::Bytes).unwrap_or(Value::Null));
    }

    let text: Option<String> = row.try_get_unchecked(index)?;
    match text {
        Some(text) => decode_text(&type_name, text).map_err(|e| {
            SelectError::unexpected(format!(
                "{} (column '{}')",
                e.message(),
                row.columns()[index].name()
            ))
        }),
        None => Ok(Value::Null),
    }
}

/// Parses one non-NULL text-protocol value according to its MySQL type name.
fn decode_text(type_name: &str, text: String) -> Result<Value> {
    match type_name {
        "BOOLEAN" => Ok(Value::Bool(text != "0")),

        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => text
            .parse::<u64>()
            .map(Value::from)
            .map_err(|e| decode_error(type_name, &text, e)),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| decode_error(type_name, &text, e)),

        "FLOAT" | "DOUBLE" => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| decode_error(type_name, &text, e)),

        // DECIMAL stays textual to keep its precision
        _ => Ok(Value::String(text)),
    }
}

fn is_binary_type(type_name: &str) -> bool {
    matches!(
        type_name,
        "BINARY"
            | "VARBINARY"
            | "BLOB"
            | "TINYBLOB"
            | "MEDIUMBLOB"
            | "LONGBLOB"
            | "BIT"
            | "GEOMETRY"
    )
}

fn decode_error(type_name: &str, text: &str, error: impl std::fmt::Display) -> SelectError {
    SelectError::unexpected(format!(
        "Could not decode value '{text}' as {type_name}: {error}"
    ))
}

/// Maps sqlx connection errors to driver errors that name the target server.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> SelectError {
    let host = &config.host;
    let port = config.port;
    let user = &config.user;

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        SelectError::driver(format!(
            "Cannot connect to {host}:{port}. Check that the server is running. ({error})"
        ))
    } else if error_str.contains("access denied") {
        SelectError::driver(format!(
            "Authentication failed for user '{user}'. ({error})"
        ))
    } else {
        SelectError::driver(error.to_string())
    }
}
