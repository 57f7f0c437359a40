//! Error handling for the Cat Box Planner backend
//!
//! Provides consistent error reports for the command line

use serde::Serialize;
use shared::{PlanError, ValidationReport};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Plan rejected: {}", .0.messages().join(" "))]
    PlanRejected(ValidationReport),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Error report structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::PlanRejected(_) => "PLAN_REJECTED",
            AppError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Serialization(_) => "INVALID_JSON",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (field, messages) = match self {
            AppError::Validation { field, .. } => (Some(field.clone()), Vec::new()),
            AppError::PlanRejected(report) => (None, report.messages()),
            _ => (None, Vec::new()),
        };
        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                field,
                messages,
            },
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::Invalid(report) => AppError::PlanRejected(report),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let (field, message) = fields
            .first()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map_or_else(|| format!("{} is invalid", field), |m| m.to_string());
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("request".to_string(), errors.to_string()));

        AppError::Validation { field, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::forms::PlanForm;
    use shared::validation::validate;

    #[test]
    fn test_plan_error_keeps_all_messages() {
        let input = PlanForm::default().into_input();
        let report = validate(&input.cat, &input.food, &input.plan, &input.settings);
        let count = report.issues.len();

        let err = AppError::from(PlanError::Invalid(report));
        assert_eq!(err.code(), "PLAN_REJECTED");
        assert_eq!(err.to_response().error.messages.len(), count);
    }

    #[test]
    fn test_config_error_response() {
        let err = AppError::from(config::ConfigError::Message(
            "missing field `planner`".to_string(),
        ));
        let response = err.to_response();
        assert_eq!(response.error.code, "CONFIGURATION_ERROR");
        assert!(response.error.message.contains("planner"));
    }

    #[test]
    fn test_not_found_response() {
        let err = AppError::NotFound("Order CAT-20250101-ABCDEF".to_string());
        let response = err.to_response();
        assert_eq!(response.error.code, "NOT_FOUND");
        assert!(response.error.message.contains("CAT-20250101-ABCDEF"));
        assert!(response.error.field.is_none());
    }
}
