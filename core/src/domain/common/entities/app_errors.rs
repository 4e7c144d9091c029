use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No matching product found")]
    NotFound,

    #[error("Product data source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound => ErrorKind::NotFound,
            CoreError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            CoreError::MalformedInput(_) => ErrorKind::MalformedInput,
            CoreError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Machine readable error category exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    UpstreamUnavailable,
    MalformedInput,
    Internal,
}

/// Structured error object returned in place of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorReport {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&CoreError> for ErrorReport {
    fn from(error: &CoreError) -> Self {
        Self {
            error: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<CoreError> for ErrorReport {
    fn from(error: CoreError) -> Self {
        Self::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_uses_snake_case_kind() {
        let report = ErrorReport::from(CoreError::NotFound);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "No matching product found");
    }

    #[test]
    fn test_upstream_error_keeps_detail() {
        let report = ErrorReport::from(CoreError::UpstreamUnavailable("timeout".to_string()));
        assert_eq!(report.error, ErrorKind::UpstreamUnavailable);
        assert!(report.message.contains("timeout"));
    }
}
