//! Identifier allow-list.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, SelectError};

/// Column specification selecting every column.
pub const WILDCARD: &str = "*";

/// Optionally qualified identifier: `name` or `qualifier.name`, each part
/// made of ASCII letters, digits and underscores and not starting with a
/// digit. A bare number would otherwise select a constant or order by
/// position.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("identifier pattern is valid")
    })
}

/// Checks that `name` is a plain identifier safe to interpolate.
///
/// `what` names the argument in the error message ("table", "order column").
pub fn validate_identifier(what: &str, name: &str) -> Result<()> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(SelectError::validation(format!(
            "Invalid {what} name '{name}'. Use letters, digits and underscores, starting with a letter or underscore."
        )))
    }
}

/// Checks a column specification: `*` or a comma-separated identifier list.
pub fn validate_column_spec(spec: &str) -> Result<()> {
    if spec == WILDCARD {
        return Ok(());
    }

    for column in spec.split(',') {
        validate_identifier("column", column.trim())?;
    }
    Ok(())
}
