//! SELECT text construction.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SelectError};
use crate::safety::{ensure_single_select, validate_column_spec, validate_identifier};

/// Which rows a select returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Every row, in driver order.
    #[default]
    All,
    /// The row with the smallest order column value.
    First,
    /// The row with the largest order column value.
    Last,
}

impl FetchMode {
    /// Returns the mode as its lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

impl FromStr for FetchMode {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(SelectError::validation(
                "Invalid fetch type. Use 'all', 'first', or 'last'.",
            )),
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated single-table SELECT.
///
/// Construction checks every identifier, so `to_sql` output is always safe
/// to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: String,
    column: String,
    order_column: String,
    fetch: FetchMode,
}

impl SelectQuery {
    /// Validates the parts and builds the query.
    pub fn new(table: &str, column: &str, order_column: &str, fetch: FetchMode) -> Result<Self> {
        validate_identifier("table", table)?;
        validate_column_spec(column)?;
        if fetch != FetchMode::All {
            validate_identifier("order column", order_column)?;
        }

        let query = Self {
            table: table.to_string(),
            column: column.to_string(),
            order_column: order_column.to_string(),
            fetch,
        };
        ensure_single_select(&query.to_sql())?;
        Ok(query)
    }

    /// Returns the fetch mode.
    pub fn fetch(&self) -> FetchMode {
        self.fetch
    }

    /// Renders the SQL text.
    pub fn to_sql(&self) -> String {
        let Self {
            table,
            column,
            order_column,
            fetch,
        } = self;

        match fetch {
            FetchMode::First => {
                format!("SELECT {column} FROM {table} ORDER BY {order_column} ASC LIMIT 1")
            }
            FetchMode::Last => {
                format!("SELECT {column} FROM {table} ORDER BY {order_column} DESC LIMIT 1")
            }
            FetchMode::All => format!("SELECT {column} FROM {table}"),
        }
    }
}
