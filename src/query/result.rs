//! Result shaping.
//!
//! A select returns either a flat list of values or a list of ordered
//! column-name to value mappings, depending on the columns that came back.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::db::{QueryResult, Value};
use crate::error::{Result, SelectError};
use crate::safety::WILDCARD;

/// One row as column-name to value pairs, in driver column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMap(Vec<(String, Value)>);

impl RowMap {
    /// Returns the value for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the column names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for RowMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Successful payload of a select.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Selection {
    /// One value per row, for a single named column.
    Values(Vec<Value>),
    /// One mapping per row.
    Rows(Vec<RowMap>),
}

impl Selection {
    /// Shapes a raw result.
    ///
    /// Flat values are returned when `requested_column` is not the wildcard
    /// and the result carries exactly one column. This keys off the returned
    /// column count, not the number of columns requested.
    pub fn shape(requested_column: &str, result: QueryResult) -> Result<Self> {
        let width = result.columns.len();
        if let Some((index, row)) = result
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(SelectError::unexpected(format!(
                "Row {index} has {} values for {width} columns",
                row.len()
            )));
        }

        if requested_column != WILDCARD && width == 1 {
            let values: Vec<Value> = result
                .rows
                .into_iter()
                .filter_map(|row| row.into_iter().next())
                .collect();
            return Ok(Self::Values(values));
        }

        let names: Vec<String> = result.columns.into_iter().map(|c| c.name).collect();
        let rows: Vec<RowMap> = result
            .rows
            .into_iter()
            .map(|row| names.iter().cloned().zip(row).collect::<RowMap>())
            .collect();
        Ok(Self::Rows(rows))
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Rows(rows) => rows.len(),
        }
    }

    /// Returns true if no rows were selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row mappings, if this is a multi-column selection.
    pub fn as_rows(&self) -> Option<&[RowMap]> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Values(_) => None,
        }
    }
}
