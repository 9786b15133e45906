//! Query execution.
//!
//! Resolves the connection config for a database key, validates the request,
//! opens one connection, runs the select, shapes the result, and closes the
//! connection on every path once it is open.

use tracing::{debug, info, warn};

use super::builder::{FetchMode, SelectQuery};
use super::result::Selection;
use crate::config::{load_db_config_from, ConfigSource, ConnectionConfig, EnvSource};
use crate::db::{Connector, DatabaseClient, MySqlConnector};
use crate::error::Result;
use crate::safety::WILDCARD;

/// Default order column for `first` and `last` fetches.
pub const DEFAULT_ORDER_COLUMN: &str = "id";

/// Parameters of a single-table select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    /// Database key naming the config slot.
    pub db_key: String,
    /// Table to select from.
    pub table: String,
    /// Fetch mode as given by the caller, validated at execution.
    pub fetch: String,
    /// `*` or a comma-separated column list.
    pub column: String,
    /// Column ordering `first` and `last` fetches.
    pub order_column: String,
}

impl SelectRequest {
    /// Creates a request for every column of every row.
    pub fn new(db_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            db_key: db_key.into(),
            table: table.into(),
            fetch: FetchMode::All.as_str().to_string(),
            column: WILDCARD.to_string(),
            order_column: DEFAULT_ORDER_COLUMN.to_string(),
        }
    }

    /// Sets the fetch mode (`all`, `first` or `last`).
    pub fn fetch(mut self, fetch: impl Into<String>) -> Self {
        self.fetch = fetch.into();
        self
    }

    /// Sets the column specification.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Sets the order column.
    pub fn order_column(mut self, order_column: impl Into<String>) -> Self {
        self.order_column = order_column.into();
        self
    }
}

/// Runs select requests against connections opened by a `Connector`.
pub struct QueryExecutor<'a> {
    source: &'a dyn ConfigSource,
    connector: &'a dyn Connector,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(source: &'a dyn ConfigSource, connector: &'a dyn Connector) -> Self {
        Self { source, connector }
    }

    /// Executes `request`.
    ///
    /// Errors take precedence in this order: config, validation, driver,
    /// result shaping.
    pub async fn execute(&self, request: &SelectRequest) -> Result<Selection> {
        let config = load_db_config_from(self.source, &request.db_key)?;

        let fetch: FetchMode = request.fetch.parse()?;
        let query = SelectQuery::new(
            &request.table,
            &request.column,
            &request.order_column,
            fetch,
        )?;

        let mut client = self.open(&request.db_key, &config).await?;
        let outcome = run(client.as_mut(), &query, &request.column).await;

        if let Err(e) = client.close().await {
            warn!("Failed to close connection for '{}': {}", request.db_key, e);
        }

        match &outcome {
            Ok(selection) => info!(
                "Selected {} row(s) from {} ({})",
                selection.len(),
                request.table,
                query.fetch()
            ),
            Err(e) => debug!("Select on {} failed: {}", request.table, e),
        }
        outcome
    }

    async fn open(
        &self,
        db_key: &str,
        config: &ConnectionConfig,
    ) -> Result<Box<dyn DatabaseClient>> {
        debug!("Opening connection for '{}': {}", db_key, config.display_string());
        self.connector.connect(config).await
    }
}

async fn run(
    client: &mut dyn DatabaseClient,
    query: &SelectQuery,
    requested_column: &str,
) -> Result<Selection> {
    let sql = query.to_sql();
    debug!("Executing: {}", sql);

    let result = client.execute_query(&sql).await?;
    debug!(
        "Query returned {} row(s) in {:?}",
        result.row_count(),
        result.execution_time
    );

    Selection::shape(requested_column, result)
}

/// Runs `request` against MySQL using the process environment for config.
pub async fn select(request: &SelectRequest) -> Result<Selection> {
    QueryExecutor::new(&EnvSource, &MySqlConnector)
        .execute(request)
        .await
}

/// Selects from `table_name` on the database named by `db_key`.
///
/// `fetch` is `all`, `first` or `last`; `column` is `*` or a comma-separated
/// list; `order_column` orders `first`/`last`. [`SelectRequest::new`] carries
/// the defaults `all`, `*` and `id`.
pub async fn sql_query_select(
    db_key: &str,
    table_name: &str,
    fetch: &str,
    column: &str,
    order_column: &str,
) -> Result<Selection> {
    let request = SelectRequest::new(db_key, table_name)
        .fetch(fetch)
        .column(column)
        .order_column(order_column);
    select(&request).await
}
