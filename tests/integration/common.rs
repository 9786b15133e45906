//! SQLite-backed client used to run the executor against a real driver.

use async_trait::async_trait;
use db_select::config::ConnectionConfig;
use db_select::db::{ColumnInfo, Connector, DatabaseClient, QueryResult, Row, Value};
use db_select::error::{Result, SelectError};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Column as _, Connection as _, Executor as _, Row as _, Statement as _, TypeInfo as _};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Statements that create the table used by the select tests.
pub const SEED: &[&str] = &[
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
    "INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b'), (3, 'c')",
];

/// Config slot for the `shop` database key.
pub fn shop_slot() -> HashMap<String, String> {
    [
        ("DB_SHOP_HOST", "localhost"),
        ("DB_SHOP_USER", "reader"),
        ("DB_SHOP_PASSWORD", "pw"),
        ("DB_SHOP_NAME", "shop"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Open and close counts shared by a connector and its clients.
#[derive(Debug, Default)]
pub struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl Counters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Client over one in-memory SQLite connection.
pub struct SqliteClient {
    conn: Option<SqliteConnection>,
    counters: Arc<Counters>,
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| SelectError::driver("Connection is already closed"))?;

        let statement = (&mut *conn).prepare(sql).await?;
        let columns: Vec<ColumnInfo> = statement
            .columns()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
            .collect();

        let rows: Vec<SqliteRow> = statement.query().fetch_all(&mut *conn).await?;
        let rows: Vec<Row> = rows.iter().map(convert_row).collect();

        Ok(QueryResult::with_data(columns, rows))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            conn.close().await?;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}

fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| {
            if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
                return Value::from(v);
            }
            if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
                return Value::from(v);
            }
            if let Ok(v) = row.try_get::<Option<String>, _>(i) {
                return Value::from(v);
            }
            row.try_get::<Option<Vec<u8>>, _>(i)
                .ok()
                .flatten()
                .map(Value::Bytes)
                .unwrap_or(Value::Null)
        })
        .collect()
}

/// Opens a fresh in-memory database seeded with [`SEED`] on every connect.
#[derive(Default)]
pub struct SqliteConnector {
    counters: Arc<Counters>,
}

impl SqliteConnector {
    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    async fn connect(&self, _config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
        for statement in SEED {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(SqliteClient {
            conn: Some(conn),
            counters: Arc::clone(&self.counters),
        }))
    }
}
