//! FILENAME: report-engine/src/aggregator.rs
//! Explicit Aggregator - GROUP BY emulated in application memory.
//!
//! Used when the summary function has no native SQL aggregate in the
//! targeted dialects (Product, Variance, Standard Deviation) or when a
//! strategy forces an otherwise pushable function through this path.
//!
//! The input is a flat result set: grouping label columns followed by one
//! trailing value column, with no SQL-side grouping. The whole bounded
//! result is buffered, so repeated passes are plain in-memory scans rather
//! than scrollable-cursor rewinds. Complexity is O(rows x distinct groups),
//! acceptable only because the row cap bounds the input.

use std::collections::HashSet;

use datalayer::{ResultSet, Row, SqlValue};
use schema::SummaryFunction;

use crate::error::ReportError;
use crate::summary;

/// Groups `result` by every column except the trailing value column and
/// evaluates `function` over each group's values. Output rows are the
/// group key values with the computed summary appended, in first-observed
/// group order.
///
/// Count groups count rows regardless of the value cell's type. Every
/// other function widens the value cell to f64 and aborts the whole
/// computation with `TypeMismatch` on the first non-numeric cell, so no
/// partial page can escape.
pub fn aggregate(
    function: SummaryFunction,
    result: &ResultSet,
    value_field: &str,
) -> Result<Vec<Row>, ReportError> {
    if result.rows.is_empty() {
        return Ok(Vec::new());
    }
    let key_len = result.field_count().saturating_sub(1);

    // Distinct group keys, set semantics but first-observed order.
    let mut seen: HashSet<&[SqlValue]> = HashSet::new();
    let mut keys: Vec<&[SqlValue]> = Vec::new();
    for row in &result.rows {
        let key = &row[..key_len];
        if seen.insert(key) {
            keys.push(key);
        }
    }

    let mut out: Vec<Row> = Vec::with_capacity(keys.len());
    for key in keys {
        // Re-scan the buffered result for this group's value entries.
        let mut values: Vec<f64> = Vec::new();
        let mut member_count = 0usize;
        for row in &result.rows {
            if &row[..key_len] != key {
                continue;
            }
            if function == SummaryFunction::Count {
                member_count += 1;
                continue;
            }
            let cell = &row[key_len];
            match cell.as_f64() {
                Some(v) => values.push(v),
                None => {
                    return Err(ReportError::TypeMismatch {
                        field: value_field.to_string(),
                        value: cell.to_string(),
                    })
                }
            }
        }

        let computed = if function == SummaryFunction::Count {
            member_count as f64
        } else {
            summary::evaluate(function, &values)?
        };

        let mut out_row: Row = key.to_vec();
        out_row.push(SqlValue::Float(computed));
        out.push(out_row);
    }

    Ok(out)
}
