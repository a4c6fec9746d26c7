//! Uniform outcome records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a command execution or an orchestrator-level operation.
///
/// `data` and `errors` are omitted from serialized output when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn ok_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::ok(message)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn failure_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure(message)
        }
    }

    /// The shape a command produces when it catches its own failure:
    /// the message doubles as the single error entry.
    pub fn from_error(error: &dyn std::fmt::Display) -> Self {
        let message = error.to_string();
        Self::failure_with_errors(message.clone(), vec![message])
    }

    /// Process exit code for this outcome.
    pub const fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of [`Command::validate`](crate::Command::validate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    pub const fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Valid exactly when `errors` is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_value(CommandResult::ok("done")).unwrap();
        assert_eq!(json, json!({"success": true, "message": "done"}));

        let result = CommandResult::ok_with_data("Found 0 studies", json!([]));
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["data"], json!([]));
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_from_error_repeats_message() {
        let result = CommandResult::from_error(&"disk full");
        assert!(!result.success);
        assert_eq!(result.message, "disk full");
        assert_eq!(result.errors, Some(vec!["disk full".to_string()]));
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_outcome_validity_follows_errors() {
        assert!(ValidationOutcome::from_errors(vec![]).valid);

        let outcome = ValidationOutcome::from_errors(vec![
            ValidationError::new("name", "Name is required").with_value(""),
        ]);
        assert!(!outcome.valid);
        assert_eq!(outcome.errors[0].to_string(), "name: Name is required");
        assert_eq!(outcome.errors[0].value, Some(json!("")));
    }
}
