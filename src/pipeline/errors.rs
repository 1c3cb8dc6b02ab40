//! Structured pipeline spec errors.
//!
//! Each error carries a stable [`ErrorCode`], a JSON pointer to the
//! offending field, a human-readable message and an optional fix hint.

use serde::Serialize;

use super::error_code::ErrorCode;

/// A single problem found in a pipeline spec
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    /// JSON pointer, e.g. `/budget/ratio`
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for PipelineSpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for PipelineSpecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_hint() {
        let err = PipelineSpecError::new(ErrorCode::InvalidBudget, "/budget/ratio", "ratio must be in (0, 1]")
            .with_hint("Use a value such as 0.2");
        assert_eq!(
            err.to_string(),
            "[invalid_budget] /budget/ratio: ratio must be in (0, 1] (hint: Use a value such as 0.2)"
        );
    }

    #[test]
    fn test_serialize_skips_missing_hint() {
        let err = PipelineSpecError::new(ErrorCode::UnknownField, "/bogus", "unrecognized field \"bogus\"");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "unknown_field");
        assert!(json.get("hint").is_none());
    }
}
