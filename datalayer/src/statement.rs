//! FILENAME: datalayer/src/statement.rs
//! Parameterized SQL statements and dialect variants.
//!
//! Literal values (filter values, page values) are never spliced into the
//! SQL text. They travel as bound parameters next to the text, and the
//! dialect decides the placeholder syntax.

use serde::{Deserialize, Serialize};

use crate::value::SqlValue;

/// SQL text plus the literal values bound to its placeholders, in
/// placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// A statement with no bound parameters.
    pub fn new(sql: String) -> Self {
        Statement {
            sql,
            params: Vec::new(),
        }
    }

    pub fn with_params(sql: String, params: Vec<SqlValue>) -> Self {
        Statement { sql, params }
    }
}

/// The SQL dialect families the engine targets. Both support native
/// GROUP BY; they differ in placeholder syntax and metadata access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlDialect {
    MySql,
    Postgres,
}

impl SqlDialect {
    /// Placeholder text for the parameter at `index` (0-based).
    pub fn placeholder(self, index: usize) -> String {
        match self {
            SqlDialect::MySql => "?".to_string(),
            SqlDialect::Postgres => format!("${}", index + 1),
        }
    }
}

impl Default for SqlDialect {
    fn default() -> Self {
        SqlDialect::MySql
    }
}
