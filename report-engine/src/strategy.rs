//! FILENAME: report-engine/src/strategy.rs
//! Pagination Strategy - pluggable page-retrieval algorithms.
//!
//! A strategy owns its schema and decides how the report's pages are
//! produced. The single-page strategy is the only one shipped here; other
//! retrieval algorithms plug in through the same trait.

use datalayer::{QueryExecutor, SqlDialect};
use schema::{PivotSchema, SummaryFunction};

use crate::engine::{Page, Reporter};
use crate::error::ReportError;

/// Produces the ordered page collection of one report.
pub trait PaginationStrategy {
    fn retrieve_pages(
        &self,
        executor: &dyn QueryExecutor,
        row_limit: usize,
    ) -> Result<Vec<Page>, ReportError>;
}

/// Ignores the page-label dimension entirely and returns exactly one page
/// containing every group.
///
/// This strategy computes Count through the explicit aggregator even
/// though Count is database-pushable elsewhere, a deliberate divergence
/// carried over from the original retrieval algorithm and expressed via
/// the reporter's `force_explicit` policy.
pub struct SinglePageStrategy {
    schema: PivotSchema,
    dialect: SqlDialect,
}

impl SinglePageStrategy {
    pub fn new(schema: PivotSchema) -> Self {
        SinglePageStrategy {
            schema,
            dialect: SqlDialect::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }
}

impl PaginationStrategy for SinglePageStrategy {
    fn retrieve_pages(
        &self,
        executor: &dyn QueryExecutor,
        row_limit: usize,
    ) -> Result<Vec<Page>, ReportError> {
        let mut schema = self.schema.clone();
        schema.page_label = None;

        let reporter = Reporter::new()
            .with_row_limit(row_limit)
            .with_dialect(self.dialect)
            .force_explicit(SummaryFunction::Count);

        Ok(reporter.compute(&schema, executor)?.pages)
    }
}
