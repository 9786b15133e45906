//! Mock database client for testing.
//!
//! Returns scripted results and counts connection opens and closes so tests
//! can check that every opened connection is released.

use super::{Connector, DatabaseClient, QueryResult};
use crate::config::ConnectionConfig;
use crate::error::{Result, SelectError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared open/close counters and the log of executed SQL.
#[derive(Debug, Default)]
pub struct ConnectionCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    executed: Mutex<Vec<String>>,
}

impl ConnectionCounters {
    /// Number of connections opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of connections closed so far.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// SQL text of every executed query, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn record(&self, sql: &str) {
        if let Ok(mut log) = self.executed.lock() {
            log.push(sql.to_string());
        }
    }
}

/// A mock database client that returns a predefined result.
pub struct MockDatabaseClient {
    response: Result<QueryResult>,
    counters: Arc<ConnectionCounters>,
    open: bool,
}

impl MockDatabaseClient {
    /// Creates a mock client that answers every query with `response`.
    pub fn new(response: Result<QueryResult>, counters: Arc<ConnectionCounters>) -> Self {
        counters.opened.fetch_add(1, Ordering::SeqCst);
        Self {
            response,
            counters,
            open: true,
        }
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&mut self, sql: &str) -> Result<QueryResult> {
        if !self.open {
            return Err(SelectError::driver("Connection is already closed"));
        }
        self.counters.record(sql);
        self.response.clone()
    }

    async fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.open
    }
}

/// Connector handing out `MockDatabaseClient`s.
#[derive(Clone)]
pub struct MockConnector {
    response: Result<QueryResult>,
    connect_error: Option<SelectError>,
    counters: Arc<ConnectionCounters>,
}

impl MockConnector {
    /// Creates a connector whose clients answer with `result`.
    pub fn with_result(result: QueryResult) -> Self {
        Self {
            response: Ok(result),
            connect_error: None,
            counters: Arc::default(),
        }
    }

    /// Creates a connector whose clients fail every query with `error`.
    pub fn failing_query(error: SelectError) -> Self {
        Self {
            response: Err(error),
            connect_error: None,
            counters: Arc::default(),
        }
    }

    /// Creates a connector that fails to connect with `error`.
    pub fn failing_connect(error: SelectError) -> Self {
        Self {
            response: Ok(QueryResult::new()),
            connect_error: Some(error),
            counters: Arc::default(),
        }
    }

    /// Returns the counters shared with every client this connector opens.
    pub fn counters(&self) -> Arc<ConnectionCounters> {
        Arc::clone(&self.counters)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
        if let Some(error) = &self.connect_error {
            return Err(error.clone());
        }
        Ok(Box::new(MockDatabaseClient::new(
            self.response.clone(),
            Arc::clone(&self.counters),
        )))
    }
}
