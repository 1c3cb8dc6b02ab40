//! Stable error codes for pipeline spec diagnostics.

use serde::Serialize;

/// Machine-readable category of a spec diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec version is not supported
    UnsupportedVersion,
    /// A budget value is out of range
    InvalidBudget,
    /// Both a word count and a ratio were given
    ConflictingBudget,
    /// A ranking or filtering parameter is out of range
    InvalidValue,
    /// A field the schema does not know
    UnknownField,
}

impl ErrorCode {
    /// Returns the snake_case name used in JSON and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidBudget => "invalid_budget",
            Self::ConflictingBudget => "conflicting_budget",
            Self::InvalidValue => "invalid_value",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
