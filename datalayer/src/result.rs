//! FILENAME: datalayer/src/result.rs
//! Result sets and column metadata.

use serde::{Deserialize, Serialize};

use crate::value::Row;

/// The coarse type classification the report layer works with. Grouping
/// columns may be either kind; the value field must be numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "numeric")]
    Numeric,
}

/// Name and classified type of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnMeta {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        ColumnMeta {
            name: name.to_string(),
            kind,
        }
    }
}

/// A fully buffered query result: column metadata plus rows in the order
/// the data source returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        ResultSet { columns, rows }
    }

    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// Classifies a database-reported type name into the two kinds the report
/// layer distinguishes. Character types ("CHAR", "VARCHAR", ...) map to
/// `Text`; everything else is treated as numeric.
pub fn classify_type(db_type_name: &str) -> ColumnKind {
    if db_type_name.to_ascii_uppercase().contains("CHAR") {
        ColumnKind::Text
    } else {
        ColumnKind::Numeric
    }
}
