//! FILENAME: report-engine/src/error.rs
//!
//! Every failure aborts the whole report computation: a returned
//! `PivotResult` is always complete, never a partial page collection.
//! The engine returns structured errors and does not log them; logging
//! is the caller's concern.

use thiserror::Error;

use datalayer::DataError;
use schema::{SchemaError, SummaryFunction};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// The schema failed validation, including unknown function names and
    /// identifiers rejected by the allow-list.
    #[error("invalid pivot schema: {0}")]
    Schema(#[from] SchemaError),

    /// A summary function that requires input was evaluated over an empty
    /// group.
    #[error("{function} requires a non-empty group")]
    EmptyGroup { function: SummaryFunction },

    /// A value-field cell could not be widened to the numeric type the
    /// summary function needs.
    #[error("non-numeric value in field {field:?}: {value:?}")]
    TypeMismatch { field: String, value: String },

    /// The distinct page-value query failed; no pages were produced.
    #[error("failed to enumerate page values: {0}")]
    PageEnumerationFailed(#[source] DataError),

    /// An underlying query failed, connection loss included.
    #[error(transparent)]
    Data(#[from] DataError),
}
