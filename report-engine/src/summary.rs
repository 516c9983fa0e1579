//! FILENAME: report-engine/src/summary.rs
//! Evaluation semantics of the summary functions.
//!
//! All arithmetic is f64; integer inputs are widened by the caller before
//! they arrive here. Sum and Product have identity results on empty input
//! (0 and 1); the remaining functions require at least one value and fail
//! with `EmptyGroup` otherwise. Variance is the population variance, and
//! Standard Deviation is its square root.

use schema::SummaryFunction;

use crate::error::ReportError;

/// Evaluates `function` over the collected values of one group.
pub fn evaluate(function: SummaryFunction, values: &[f64]) -> Result<f64, ReportError> {
    match function {
        SummaryFunction::Sum => Ok(values.iter().sum()),
        SummaryFunction::Count => Ok(values.len() as f64),
        SummaryFunction::Product => Ok(values.iter().product()),
        SummaryFunction::Min => {
            require_values(function, values)?;
            Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
        }
        SummaryFunction::Max => {
            require_values(function, values)?;
            Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }
        SummaryFunction::Avg => {
            require_values(function, values)?;
            Ok(values.iter().sum::<f64>() / values.len() as f64)
        }
        SummaryFunction::Variance => {
            require_values(function, values)?;
            Ok(population_variance(values))
        }
        SummaryFunction::StandardDeviation => {
            require_values(function, values)?;
            Ok(population_variance(values).sqrt())
        }
    }
}

fn require_values(function: SummaryFunction, values: &[f64]) -> Result<(), ReportError> {
    if values.is_empty() {
        Err(ReportError::EmptyGroup { function })
    } else {
        Ok(())
    }
}

/// Mean of squared deviations from the mean.
fn population_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
