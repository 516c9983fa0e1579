//! FILENAME: schema/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("at least one row or column label is required")]
    NoGroupLabels,

    #[error("a value field is required")]
    MissingValueField,

    #[error("unknown summary function: {0}")]
    UnknownFunction(String),

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("column not found in table: {0}")]
    UnknownColumn(String),
}
