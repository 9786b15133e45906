//! Query safety checks.
//!
//! Table and column names cannot be bound as query parameters, so they are
//! interpolated into the SQL text. Everything interpolated must first pass
//! the identifier allow-list, and the finished text must parse as exactly one
//! SELECT statement.

mod guard;
mod identifier;

pub use guard::ensure_single_select;
pub use identifier::{validate_column_spec, validate_identifier, WILDCARD};
