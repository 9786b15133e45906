//! Single-table SELECT execution for db-select.
//!
//! Builds validated SELECT text, runs it over one connection, and shapes the
//! rows into a flat value list or ordered row mappings.

pub mod builder;
pub mod executor;
pub mod result;

pub use builder::{FetchMode, SelectQuery};
pub use executor::{select, sql_query_select, QueryExecutor, SelectRequest, DEFAULT_ORDER_COLUMN};
pub use result::{RowMap, Selection};
