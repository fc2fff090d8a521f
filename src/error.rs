//! Application error types.
//!
//! These errors are serializable so the dashboard can show a structured
//! message (inline banner) instead of a bare string.

use serde::Serialize;
use thiserror::Error;

/// Message shown when a widget id does not resolve to a row the caller owns.
pub const WIDGET_NOT_FOUND_MESSAGE: &str = "Widget not found or you do not have access";

/// Errors returned by the store adapter and the editor session.
///
/// Pure derivation and merge code never returns these; only I/O does.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    /// Store operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        operation: Option<String>,
    },

    /// Requested widget does not exist (or is not visible to the caller).
    #[error("{message}")]
    NotFound {
        message: String,
        resource: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Invalid input provided.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    /// Internal error (serialization and the like).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            operation: None,
        }
    }

    /// Create a database error with operation context.
    pub fn database_with_op(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            operation: Some(operation.into()),
        }
    }

    /// The user-facing "widget not found" error.
    pub fn widget_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            message: WIDGET_NOT_FOUND_MESSAGE.to_string(),
            resource: "Widget".to_string(),
            id: Some(id.into()),
        }
    }

    /// Create a not found error for any resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::NotFound {
            message: format!("Not found: {}", resource),
            resource,
            id: None,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error with field name.
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Conversions from common error types

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<crate::db::DbError> for AppError {
    fn from(err: crate::db::DbError) -> Self {
        Self::database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = AppError::database("connection failed");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"Database\""));
        assert!(json.contains("connection failed"));
    }

    #[test]
    fn test_widget_not_found() {
        let err = AppError::widget_not_found("w-123");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), WIDGET_NOT_FOUND_MESSAGE);

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"resource\":\"Widget\""));
        assert!(json.contains("\"id\":\"w-123\""));
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let err = AppError::database("error");
        let json = serde_json::to_string(&err).unwrap();
        // operation is None, so should not appear
        assert!(!json.contains("operation"));
    }

    #[test]
    fn test_display_impl() {
        let err = AppError::invalid_input_field("Unknown template 'x'", "templateId");
        assert_eq!(format!("{}", err), "Invalid input: Unknown template 'x'");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
