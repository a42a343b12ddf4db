//! Chart listing errors

use super::ChartCiError;

/// Creates a listing read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ChartCiError {
    ChartCiError::ListingReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a listing parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ChartCiError {
    ChartCiError::ListingParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid listing error
pub fn invalid(message: impl Into<String>) -> ChartCiError {
    ChartCiError::ListingInvalid {
        message: message.into(),
    }
}
