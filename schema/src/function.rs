//! FILENAME: schema/src/function.rs
//! Summary function registry.
//!
//! Each report computes exactly one summary function over the value field
//! of every group. A function is either "pushable" (the database can compute
//! it with a native SQL aggregate) or must be computed explicitly in
//! application memory because the targeted dialects lack an aggregate for it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SchemaError;

/// The summary functions a pivot schema may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryFunction {
    Sum,
    Min,
    Max,
    Avg,
    Count,
    Product,
    Variance,
    StandardDeviation,
}

impl Default for SummaryFunction {
    fn default() -> Self {
        SummaryFunction::Sum
    }
}

impl SummaryFunction {
    /// All recognized functions, in display order.
    pub const ALL: [SummaryFunction; 8] = [
        SummaryFunction::Sum,
        SummaryFunction::Min,
        SummaryFunction::Max,
        SummaryFunction::Avg,
        SummaryFunction::Count,
        SummaryFunction::Product,
        SummaryFunction::Variance,
        SummaryFunction::StandardDeviation,
    ];

    /// Parses a function name, case-insensitively.
    ///
    /// Accepts the display names used by the report UI ("Standard Deviation")
    /// as well as compact spellings ("stddev", "average").
    pub fn parse(name: &str) -> Result<Self, SchemaError> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "sum" => Ok(SummaryFunction::Sum),
            "min" => Ok(SummaryFunction::Min),
            "max" => Ok(SummaryFunction::Max),
            "avg" | "average" => Ok(SummaryFunction::Avg),
            "count" => Ok(SummaryFunction::Count),
            "product" => Ok(SummaryFunction::Product),
            "variance" | "var" => Ok(SummaryFunction::Variance),
            "standard deviation" | "stddev" | "std dev" => {
                Ok(SummaryFunction::StandardDeviation)
            }
            _ => Err(SchemaError::UnknownFunction(name.to_string())),
        }
    }

    /// Whether the database can compute this function with a native SQL
    /// aggregate. Product, Variance and Standard Deviation are computed in
    /// application memory instead.
    pub fn is_pushable(self) -> bool {
        match self {
            SummaryFunction::Sum
            | SummaryFunction::Min
            | SummaryFunction::Max
            | SummaryFunction::Avg
            | SummaryFunction::Count => true,
            SummaryFunction::Product
            | SummaryFunction::Variance
            | SummaryFunction::StandardDeviation => false,
        }
    }

    /// The native SQL aggregate keyword, for pushable functions only.
    pub fn sql_name(self) -> Option<&'static str> {
        match self {
            SummaryFunction::Sum => Some("SUM"),
            SummaryFunction::Min => Some("MIN"),
            SummaryFunction::Max => Some("MAX"),
            SummaryFunction::Avg => Some("AVG"),
            SummaryFunction::Count => Some("COUNT"),
            _ => None,
        }
    }

    /// Display name, as shown in the report UI.
    pub fn name(self) -> &'static str {
        match self {
            SummaryFunction::Sum => "Sum",
            SummaryFunction::Min => "Min",
            SummaryFunction::Max => "Max",
            SummaryFunction::Avg => "Avg",
            SummaryFunction::Count => "Count",
            SummaryFunction::Product => "Product",
            SummaryFunction::Variance => "Variance",
            SummaryFunction::StandardDeviation => "Standard Deviation",
        }
    }
}

impl fmt::Display for SummaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
