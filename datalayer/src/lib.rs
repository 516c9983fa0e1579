//! FILENAME: datalayer/src/lib.rs
//! Data source boundary for the pivot reporting engine.
//!
//! This crate defines everything the engine needs from a database without
//! implementing a database: the scalar value model, result sets with column
//! metadata, parameterized SQL statements, the dialect variants, and the
//! `QueryExecutor` / `TableCatalog` capability traits a concrete data
//! source implements.
//!
//! Layers:
//! - `value`: Scalar values and rows (hashable, so rows can key group maps)
//! - `result`: Result sets and column metadata
//! - `statement`: Parameterized SQL statements and dialect variants
//! - `source`: Executor/catalog traits and connection configuration
//! - `error`: Data-source errors

pub mod error;
pub mod result;
pub mod source;
pub mod statement;
pub mod value;

pub use error::DataError;
pub use result::{classify_type, ColumnKind, ColumnMeta, ResultSet};
pub use source::{ConnectionConfig, QueryExecutor, TableCatalog};
pub use statement::{SqlDialect, Statement};
pub use value::{Row, SqlValue};
