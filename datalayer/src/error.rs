//! FILENAME: datalayer/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("database connection unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("query execution failed: {0}")]
    QueryFailed(String),
}
