//! Centralized error types for Taskdeck.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for Taskdeck operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Subtask not found: {subtask_id} (task {task_id})")]
    SubtaskNotFound { task_id: String, subtask_id: String },

    #[error("Team member not found: {0}")]
    MemberNotFound(String),

    #[error("Team member '{member}' is still assigned to {tasks} task(s)")]
    MemberInUse { member: String, tasks: usize },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid value '{value}' for {kind}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Seed data error: {0}")]
    Seed(String),

    #[error("Command executor error: {0}")]
    Executor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for Taskdeck operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a seed data error.
    pub fn seed(msg: impl Into<String>) -> Self {
        Self::Seed(msg.into())
    }

    /// Create an executor error.
    pub fn executor(msg: impl Into<String>) -> Self {
        Self::Executor(msg.into())
    }

    /// Field-level errors, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => &errors.fields,
            _ => &[],
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field-level message produced while validating one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First message recorded for `field`.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> CoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "Task title is required");
        errors.add("assignee", "Assignee is required");
        assert_eq!(
            errors.to_string(),
            "title: Task title is required; assignee: Assignee is required"
        );
    }

    #[test]
    fn test_field_errors_exposed_from_core_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Project name is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "name");
        assert!(CoreError::TaskNotFound("t1".into()).field_errors().is_empty());
    }
}
