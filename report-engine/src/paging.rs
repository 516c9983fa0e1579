//! FILENAME: report-engine/src/paging.rs
//! Paging Engine - enumerates the distinct page values of a report.
//!
//! When the schema selects a page label, every distinct value of that
//! column drives one independent query/aggregation pass, and pages keep
//! the order the distinct-value query returned. Without a page label the
//! plan is a single implicit "whole table" page, so the rest of the
//! engine runs one code path either way.

use log::debug;

use datalayer::{QueryExecutor, SqlValue};

use crate::builder::QueryBuilder;
use crate::error::ReportError;

/// One entry per page the report will compute: `Some(value)` constrains
/// the page's queries to rows where the page label equals `value`, `None`
/// is the implicit whole-table page of an unpaged report.
pub fn page_plan(
    builder: &QueryBuilder<'_>,
    executor: &dyn QueryExecutor,
) -> Result<Vec<Option<SqlValue>>, ReportError> {
    let statement = match builder.page_values_query() {
        Some(statement) => statement,
        None => return Ok(vec![None]),
    };

    debug!("running query {}", statement.sql);
    let result = executor
        .run(&statement)
        .map_err(ReportError::PageEnumerationFailed)?;

    Ok(result
        .rows
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(Some)
        .collect())
}
