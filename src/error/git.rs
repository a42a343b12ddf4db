//! Git operation errors

use super::ChartCiError;

/// Creates a git open failed error
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> ChartCiError {
    ChartCiError::GitOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a git fetch failed error
pub fn fetch_failed(
    url: impl Into<String>,
    git_ref: impl Into<String>,
    reason: impl Into<String>,
) -> ChartCiError {
    ChartCiError::GitFetchFailed {
        url: url.into(),
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

/// Creates a ref resolution error
pub fn ref_resolve_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> ChartCiError {
    ChartCiError::GitRefResolveFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

/// Creates a generic git operation error
pub fn operation_failed(message: impl Into<String>) -> ChartCiError {
    ChartCiError::GitOperationFailed {
        message: message.into(),
    }
}
