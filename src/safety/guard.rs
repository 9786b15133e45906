//! Final check on generated SQL text.
//!
//! Uses sqlparser-rs with the MySQL dialect.

use sqlparser::ast::{SetExpr, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::error::{Result, SelectError};

/// Fails unless `sql` parses as exactly one plain SELECT statement.
pub fn ensure_single_select(sql: &str) -> Result<()> {
    let statements = Parser::parse_sql(&MySqlDialect {}, sql).map_err(|e| {
        SelectError::validation(format!("Refusing to run generated SQL '{sql}': {e}"))
    })?;

    match statements.as_slice() {
        [Statement::Query(query)] if matches!(query.body.as_ref(), SetExpr::Select(_)) => Ok(()),
        [_] => Err(SelectError::validation(format!(
            "Refusing to run generated SQL '{sql}': not a plain SELECT"
        ))),
        _ => Err(SelectError::validation(format!(
            "Refusing to run generated SQL '{sql}': expected exactly one statement, found {}",
            statements.len()
        ))),
    }
}
