//! FILENAME: report-engine/src/engine.rs
//! Pivot Query Orchestrator.
//!
//! `Reporter` ties the layers together: validate the schema, enumerate the
//! page plan, and per page either push the aggregation into the database
//! (native aggregate + GROUP BY) or run the flat query and group in memory.
//! Pages are computed sequentially and independently; the first failure
//! aborts the whole computation so no partial result can escape.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use datalayer::{QueryExecutor, ResultSet, Row, SqlDialect, SqlValue, Statement, TableCatalog};
use schema::{PivotSchema, SchemaError, SummaryFunction};

use crate::aggregator;
use crate::builder::QueryBuilder;
use crate::error::ReportError;
use crate::paging;

/// Default cap on the number of source rows any single query may return.
pub const DEFAULT_ROW_LIMIT: usize = 1000;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One independently aggregated result set: all groups for one distinct
/// page value (or for the whole table when the report is unpaged). Each
/// row holds the group's label values in schema order with the computed
/// summary value appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub rows: Vec<Row>,
}

/// The complete report: one page per planned page value, in enumeration
/// order. All pages of one result were produced by exactly one of the two
/// execution paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotResult {
    pub pages: Vec<Page>,
}

impl PivotResult {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Computes pivot reports against a `QueryExecutor`.
///
/// `force_explicit` routes otherwise pushable functions through the
/// in-memory aggregator; the single-page strategy uses it to compute Count
/// explicitly, and it is kept as a policy knob rather than strategy-local
/// special casing.
#[derive(Debug, Clone)]
pub struct Reporter {
    row_limit: usize,
    dialect: SqlDialect,
    force_explicit: HashSet<SummaryFunction>,
}

impl Default for Reporter {
    fn default() -> Self {
        Reporter {
            row_limit: DEFAULT_ROW_LIMIT,
            dialect: SqlDialect::default(),
            force_explicit: HashSet::new(),
        }
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Routes `function` through the explicit aggregator even though it is
    /// database-pushable.
    pub fn force_explicit(mut self, function: SummaryFunction) -> Self {
        self.force_explicit.insert(function);
        self
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    /// Computes the full report for `schema`. Fail-fast: any page failure
    /// aborts the call and returns no pages.
    pub fn compute(
        &self,
        schema: &PivotSchema,
        executor: &dyn QueryExecutor,
    ) -> Result<PivotResult, ReportError> {
        schema.validate()?;

        let builder = QueryBuilder::new(schema, self.dialect, self.row_limit);
        let plan = paging::page_plan(&builder, executor)?;

        let push_down = match schema.function.sql_name() {
            Some(aggregate) if !self.force_explicit.contains(&schema.function) => Some(aggregate),
            _ => None,
        };

        let mut pages = Vec::with_capacity(plan.len());
        for page_value in &plan {
            let rows = match push_down {
                Some(aggregate) => {
                    let statement = builder.aggregate_query(aggregate, page_value.as_ref());
                    debug!("running query {}", statement.sql);
                    normalize_summary(executor.run(&statement)?.rows)
                }
                None => {
                    let statement = builder.flat_query(page_value.as_ref());
                    debug!("running query {}", statement.sql);
                    let result = executor.run(&statement)?;
                    aggregator::aggregate(schema.function, &result, &schema.value_field)?
                }
            };
            pages.push(Page { rows });
        }

        Ok(PivotResult { pages })
    }

    /// Like `compute`, but first pins every schema-referenced column to the
    /// catalog-reported columns of the source table.
    pub fn compute_checked(
        &self,
        schema: &PivotSchema,
        executor: &dyn QueryExecutor,
        catalog: &dyn TableCatalog,
    ) -> Result<PivotResult, ReportError> {
        let columns = catalog.columns(&schema.table_name)?;
        schema.validate_against(columns.iter().map(|c| c.name.as_str()))?;
        self.compute(schema, executor)
    }
}

/// Push-down rows arrive with whatever numeric type the database chose for
/// the aggregate (COUNT is typically integral). Widening the trailing
/// summary cell to float keeps the two execution paths comparable.
fn normalize_summary(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            if let Some(cell) = row.last_mut() {
                if let Some(value) = cell.as_f64() {
                    *cell = SqlValue::Float(value);
                }
            }
            row
        })
        .collect()
}

/// Fetches a bounded preview of a raw table (`SELECT * FROM table LIMIT n`).
pub fn fetch_table_preview(
    executor: &dyn QueryExecutor,
    table: &str,
    limit: usize,
) -> Result<ResultSet, ReportError> {
    if !schema::is_valid_identifier(table) {
        return Err(SchemaError::InvalidIdentifier(table.to_string()).into());
    }
    let statement = Statement::new(format!("SELECT * FROM {} LIMIT {}", table, limit));
    debug!("running query {}", statement.sql);
    Ok(executor.run(&statement)?)
}
