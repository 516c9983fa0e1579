//! FILENAME: schema/src/lib.rs
//! Pivot Schema - the declarative description of a report.
//!
//! This crate contains all the types needed to DESCRIBE a pivot table
//! report over a relational table. These structures are designed to be:
//! - Serializable (reports travel as JSON between UI and service)
//! - Immutable snapshots of user intent
//! - Validated before any SQL is generated from them
//!
//! Layers:
//! - `definition`: The schema itself (grouping fields, filter, sort, paging)
//! - `function`: Summary function registry (semantics + DB pushability)
//! - `error`: Validation errors

pub mod definition;
pub mod error;
pub mod function;

pub use definition::*;
pub use error::SchemaError;
pub use function::SummaryFunction;
