//! Error types for rapid_summarize
//!
//! Only caller mistakes are surfaced here. Degenerate graphs and zero
//! denominators are recovered inside the graph and ranking stages.

use thiserror::Error;

/// Errors returned by the summarization API
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Word-count or ratio budget outside its valid range
    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    /// Ranking or filtering parameters outside their valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller required a non-empty summary but the document has no sentences
    #[error("document contains no sentences")]
    DocumentEmpty,

    /// A pipeline spec failed validation
    #[error("invalid pipeline spec: {0}")]
    InvalidSpec(String),

    /// A pipeline spec could not be parsed
    #[error("failed to parse pipeline spec: {0}")]
    Json(#[from] serde_json::Error),
}

impl SummarizeError {
    /// Create an invalid budget error
    pub fn invalid_budget(msg: impl Into<String>) -> Self {
        SummarizeError::InvalidBudget(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        SummarizeError::InvalidConfig(msg.into())
    }

    /// Create an invalid spec error
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        SummarizeError::InvalidSpec(msg.into())
    }
}

/// Result type alias for rapid_summarize operations
pub type Result<T> = std::result::Result<T, SummarizeError>;
