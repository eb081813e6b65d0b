//! Error bodies returned by the admin API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A generic failure (not found, forbidden, conflict...).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApplicationError {
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Value::Object(Default::default()),
        }
    }
}

/// One invalid input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path to the offending value, e.g. `["headers", "Authorization"]`.
    pub path: Vec<String>,
    pub message: String,
    #[serde(default)]
    pub name: String,
}

/// `details` of a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetails {
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
}

/// The request body failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({} issue(s))", .details.errors.len())]
pub struct ValidationError {
    pub message: String,
    #[serde(default)]
    pub details: ValidationDetails,
}

/// Either error, discriminated by its `name` field.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum ContractError {
    #[error(transparent)]
    ApplicationError(ApplicationError),
    #[error(transparent)]
    ValidationError(ValidationError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn contract_error_is_tagged_by_name() {
        let err: ContractError = serde_json::from_value(json!({
            "name": "ValidationError",
            "message": "2 errors occurred",
            "details": {
                "errors": [
                    {
                        "path": ["url"],
                        "message": "url must be a valid URL",
                        "name": "ValidationError"
                    },
                    {
                        "path": ["events"],
                        "message": "events is required",
                        "name": "ValidationError"
                    }
                ]
            }
        }))
        .unwrap();

        let ContractError::ValidationError(validation) = &err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert_eq!(validation.details.errors[0].path, vec!["url"]);
        assert_eq!(err.to_string(), "2 errors occurred (2 issue(s))");
    }

    #[test]
    fn application_error_round_trips_name() {
        let err = ContractError::ApplicationError(ApplicationError::new("Webhook not found"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["name"], "ApplicationError");
        assert_eq!(json["message"], "Webhook not found");
    }
}
