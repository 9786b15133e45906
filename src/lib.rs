//! db-select - run single-table SELECTs against env-configured databases.
//!
//! ```no_run
//! # async fn demo() -> db_select::error::Result<()> {
//! let names = db_select::sql_query_select("chat_app", "users", "first", "name", "id").await?;
//! println!("{}", serde_json::to_string(&names).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod safety;

pub use config::{load_db_config, ConnectionConfig};
pub use error::{ErrorKind, Result, SelectError};
pub use query::{sql_query_select, QueryExecutor, RowMap, SelectRequest, Selection};
