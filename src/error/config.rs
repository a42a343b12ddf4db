//! Configuration errors

use super::ChartCiError;

/// Creates a missing required input error
pub fn missing_input(name: impl Into<String>) -> ChartCiError {
    ChartCiError::MissingInput { name: name.into() }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> ChartCiError {
    ChartCiError::ConfigInvalid {
        message: message.into(),
    }
}
