//! FILENAME: schema/src/definition.rs
//! Pivot Schema Definition - The serializable report request.
//!
//! A `PivotSchema` describes one report: which columns group the data
//! (row and column labels), an optional page field that partitions the
//! report into independent pages, the summary function and its value
//! field, and optional filtering and sorting.
//!
//! The schema is caller-owned and read-only to the engine. Validation is
//! split in two: `validate` enforces the structural invariants and the
//! identifier allow-list, `validate_against` additionally pins every
//! referenced column to the catalog-reported column names of the source
//! table.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::function::SummaryFunction;

// ============================================================================
// SORT AND FILTER
// ============================================================================

/// Sort direction for the optional report sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// The SQL keyword for this direction.
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

/// Restricts the report to rows where `field` equals `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

/// Orders the report rows by `field` in the given direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

// ============================================================================
// MAIN SCHEMA STRUCT
// ============================================================================

/// The complete, serializable description of one pivot table report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotSchema {
    /// Columns grouping the report rows (ordered, outer to inner).
    pub row_labels: Vec<String>,

    /// Columns grouping the report columns (ordered, outer to inner).
    pub col_labels: Vec<String>,

    /// Optional column whose distinct values partition the report into
    /// independent pages.
    #[serde(default)]
    pub page_label: Option<String>,

    /// The summary function applied to every group.
    pub function: SummaryFunction,

    /// The column the summary function is computed over. Assumed numeric;
    /// the caller validates the type against the table catalog.
    pub value_field: String,

    /// Optional equality filter applied before grouping.
    #[serde(default)]
    pub filter: Option<Filter>,

    /// Optional sort applied to the source rows.
    #[serde(default)]
    pub sort: Option<Sort>,

    /// The source table the report is computed over.
    pub table_name: String,
}

impl PivotSchema {
    /// Creates a minimal schema; labels, filter and sort start empty.
    pub fn new(table_name: &str, function: SummaryFunction, value_field: &str) -> Self {
        PivotSchema {
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            page_label: None,
            function,
            value_field: value_field.to_string(),
            filter: None,
            sort: None,
            table_name: table_name.to_string(),
        }
    }

    /// Row labels followed by column labels, in schema order. This is the
    /// order the grouping columns appear in every generated query and in
    /// every result row's group key.
    pub fn group_labels(&self) -> impl Iterator<Item = &str> {
        self.row_labels
            .iter()
            .chain(self.col_labels.iter())
            .map(String::as_str)
    }

    /// Every column identifier the schema references.
    fn column_identifiers(&self) -> impl Iterator<Item = &str> {
        self.group_labels()
            .chain(std::iter::once(self.value_field.as_str()))
            .chain(self.page_label.as_deref())
            .chain(self.filter.as_ref().map(|f| f.field.as_str()))
            .chain(self.sort.as_ref().map(|s| s.field.as_str()))
    }

    /// Checks the structural invariants: at least one grouping label, a
    /// value field, and every referenced identifier well-formed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.row_labels.is_empty() && self.col_labels.is_empty() {
            return Err(SchemaError::NoGroupLabels);
        }
        if self.value_field.trim().is_empty() {
            return Err(SchemaError::MissingValueField);
        }
        for identifier in self
            .column_identifiers()
            .chain(std::iter::once(self.table_name.as_str()))
        {
            if !is_valid_identifier(identifier) {
                return Err(SchemaError::InvalidIdentifier(identifier.to_string()));
            }
        }
        Ok(())
    }

    /// Validates the schema and additionally checks that every referenced
    /// column exists in the given catalog-reported column list.
    pub fn validate_against<'a, I>(&self, columns: I) -> Result<(), SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.validate()?;
        let known: Vec<&str> = columns.into_iter().collect();
        for identifier in self.column_identifiers() {
            if !known.contains(&identifier) {
                return Err(SchemaError::UnknownColumn(identifier.to_string()));
            }
        }
        Ok(())
    }
}

/// Identifier allow-list: ASCII alphanumerics and underscores, not starting
/// with a digit. Anything else is rejected before it can reach a query.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
