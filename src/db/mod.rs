//! Database abstraction layer for db-select.
//!
//! Provides a trait-based interface over a single database connection, so
//! the executor can run against MySQL or an in-memory mock interchangeably.

mod mock;
mod mysql;
mod types;

pub use mock::{ConnectionCounters, MockConnector, MockDatabaseClient};
pub use mysql::{MySqlClient, MySqlConnector};
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for a single open database connection.
///
/// A client owns exactly one connection. `close` must be safe to call once
/// after any outcome of `execute_query`.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Executes a SQL query and returns its columns and rows.
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<()>;

    /// Returns true while the connection is open.
    fn is_connected(&self) -> bool;
}

/// Opens database connections from a resolved configuration.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens one new connection. Never reuses an earlier one.
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>>;
}
