//! FILENAME: report-engine/src/lib.rs
//! Pivot table query planning and aggregation engine.
//!
//! This crate turns a declarative `PivotSchema` into one or more SQL
//! statements, decides whether the summary function can be pushed into the
//! database or must be computed in application memory, emulates GROUP BY
//! for functions the targeted dialects cannot aggregate natively, and
//! partitions results into independent pages keyed by the page label's
//! distinct values.
//!
//! Layers:
//! - `builder`: Assembles SELECT/GROUP BY/filter/sort SQL fragments
//! - `summary`: Evaluation semantics of the eight summary functions
//! - `aggregator`: In-memory GROUP BY for non-pushable functions
//! - `paging`: Distinct page-value enumeration and the page plan
//! - `strategy`: Pluggable page-retrieval algorithms
//! - `engine`: The orchestrator that ties the layers together

pub mod aggregator;
pub mod builder;
pub mod engine;
pub mod error;
pub mod paging;
pub mod strategy;
pub mod summary;

pub use builder::QueryBuilder;
pub use engine::{fetch_table_preview, Page, PivotResult, Reporter, DEFAULT_ROW_LIMIT};
pub use error::ReportError;
pub use strategy::{PaginationStrategy, SinglePageStrategy};
