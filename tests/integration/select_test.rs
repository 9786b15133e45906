//! Select integration tests.
//!
//! Runs the executor end to end against a seeded SQLite table
//! `users(id, name)` holding (1, 'a'), (2, 'b'), (3, 'c').

use super::common::{shop_slot, SqliteConnector};
use db_select::db::Value;
use db_select::error::ErrorKind;
use db_select::query::{QueryExecutor, RowMap, SelectRequest, Selection};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn row(id: i64, name: &str) -> RowMap {
    [("id", Value::Int(id)), ("name", Value::from(name))]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn test_fetch_all_returns_every_row_in_order() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let selection = executor
        .execute(&SelectRequest::new("shop", "users"))
        .await
        .unwrap();

    assert_eq!(
        selection,
        Selection::Rows(vec![row(1, "a"), row(2, "b"), row(3, "c")])
    );
}

#[tokio::test]
async fn test_first_single_column_is_flat() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let request = SelectRequest::new("shop", "users")
        .fetch("first")
        .column("name")
        .order_column("id");
    let selection = executor.execute(&request).await.unwrap();

    assert_eq!(selection, Selection::Values(vec![Value::from("a")]));
}

#[tokio::test]
async fn test_last_returns_highest_row_only() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let request = SelectRequest::new("shop", "users").fetch("last");
    let selection = executor.execute(&request).await.unwrap();

    assert_eq!(selection, Selection::Rows(vec![row(3, "c")]));
}

#[tokio::test]
async fn test_column_list_returns_mappings() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let request = SelectRequest::new("shop", "users").column("name, id");
    let selection = executor.execute(&request).await.unwrap();

    let rows = selection.as_rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["name", "id"]);
}

#[tokio::test]
async fn test_json_output_shape() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let selection = executor
        .execute(&SelectRequest::new("shop", "users"))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&selection).unwrap(),
        r#"[{"id":1,"name":"a"},{"id":2,"name":"b"},{"id":3,"name":"c"}]"#
    );
}

#[tokio::test]
async fn test_missing_table_is_driver_error() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let err = executor
        .execute(&SelectRequest::new("shop", "nonexistent_table_xyz"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Driver);
    assert!(err.to_string().starts_with("Driver error:"));
    assert!(err.message().contains("nonexistent_table_xyz"));
}

#[tokio::test]
async fn test_missing_column_is_driver_error() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let err = executor
        .execute(&SelectRequest::new("shop", "users").column("email"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Driver);
}

#[tokio::test]
async fn test_invalid_fetch_after_config() {
    let connector = SqliteConnector::default();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    let err = executor
        .execute(&SelectRequest::new("shop", "users").fetch("middle"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let empty: HashMap<String, String> = HashMap::new();
    let executor = QueryExecutor::new(&empty, &connector);
    let err = executor
        .execute(&SelectRequest::new("shop", "users").fetch("middle"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_every_opened_connection_is_closed_once() {
    let connector = SqliteConnector::default();
    let counters = connector.counters();
    let source = shop_slot();
    let executor = QueryExecutor::new(&source, &connector);

    // success
    executor
        .execute(&SelectRequest::new("shop", "users"))
        .await
        .unwrap();
    assert_eq!((counters.opened(), counters.closed()), (1, 1));

    // driver failure
    executor
        .execute(&SelectRequest::new("shop", "missing"))
        .await
        .unwrap_err();
    assert_eq!((counters.opened(), counters.closed()), (2, 2));

    // validation failure never opens a connection
    executor
        .execute(&SelectRequest::new("shop", "users").fetch("nope"))
        .await
        .unwrap_err();
    assert_eq!((counters.opened(), counters.closed()), (2, 2));
}
