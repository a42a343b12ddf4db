//! Report writing errors

use super::ChartCiError;

/// Creates a summary write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> ChartCiError {
    ChartCiError::SummaryWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
