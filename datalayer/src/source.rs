//! FILENAME: datalayer/src/source.rs
//! Capability traits a concrete data source implements.
//!
//! The reporting engine consumes these traits; it never opens connections
//! itself. A JDBC-style executor over MySQL or PostgreSQL lives outside
//! this workspace, and the test suite ships an in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::result::{ColumnMeta, ResultSet};
use crate::statement::Statement;

/// Connection settings for whoever constructs a concrete executor. The
/// engine itself never sees credentials; there is no process-wide
/// credential state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl ConnectionConfig {
    pub fn new(url: &str, username: &str, password: &str) -> Self {
        ConnectionConfig {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Runs one SQL statement and returns the fully buffered result. Transient
/// failures are the implementation's concern; the engine never retries.
pub trait QueryExecutor {
    fn run(&self, statement: &Statement) -> Result<ResultSet, DataError>;
}

/// Schema introspection over the data source: which tables exist and what
/// their columns look like. Consumed by callers to validate a schema's
/// value field before computing a report.
pub trait TableCatalog {
    /// Connects and disconnects once to verify the source is reachable.
    fn test_connection(&self) -> bool;

    /// Names of all report source tables.
    fn table_names(&self) -> Result<Vec<String>, DataError>;

    /// Name and classified type of every column of `table`.
    fn columns(&self, table: &str) -> Result<Vec<ColumnMeta>, DataError>;

    fn table_exists(&self, table: &str) -> Result<bool, DataError> {
        Ok(self.table_names()?.iter().any(|t| t == table))
    }
}
