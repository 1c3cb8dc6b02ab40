//! Summary specification types.
//!
//! A [`SummarySpec`] describes the budget, ranking parameters and stopword
//! handling for a summarization run. These types are the input to the
//! [`super::validation::ValidationEngine`], and a valid spec converts into a
//! [`SummarizerConfig`] plus a [`SummaryBudget`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "budget": { "word_count": 30 },
//!   "rank": { "damping": 0.85, "max_iterations": 100, "threshold": 0.0001 },
//!   "stopwords": { "language": "en", "extra": ["sedan"], "enabled": true },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::ValidationEngine;
use crate::errors::{Result, SummarizeError};
use crate::types::{SummarizerConfig, SummaryBudget};

/// The only spec version understood so far.
pub const SPEC_VERSION: u32 = 1;

/// Top-level summary specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Summary length. Omitted means the default word budget.
    #[serde(default)]
    pub budget: BudgetSpec,

    /// PageRank and graph parameters.
    #[serde(default)]
    pub rank: RankSpec,

    /// Stopword filtering.
    #[serde(default)]
    pub stopwords: StopwordSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Target summary length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetSpec {
    #[serde(default)]
    pub word_count: Option<usize>,

    #[serde(default)]
    pub ratio: Option<f64>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Ranking parameters; unset values keep the library defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSpec {
    #[serde(default)]
    pub damping: Option<f64>,

    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// Convergence threshold on the L1 delta.
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Sentences with fewer significant terms than this get no edges.
    #[serde(default)]
    pub min_significant_terms: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Stopword list selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwordSpec {
    /// Language code of the built-in list (e.g. `"en"`).
    #[serde(default)]
    pub language: Option<String>,

    /// Words added to the built-in list.
    #[serde(default)]
    pub extra: Vec<String>,

    /// `false` turns stopword filtering off.
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarySpec {
    /// Parse a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the spec and turn it into a config and a budget.
    ///
    /// All errors found by the default [`ValidationEngine`] are reported
    /// together in a single [`SummarizeError::InvalidSpec`].
    pub fn into_config(self) -> Result<(SummarizerConfig, SummaryBudget)> {
        let report = ValidationEngine::with_defaults().validate(&self);

        #[cfg(feature = "tracing")]
        {
            for warning in report.warnings() {
                tracing::warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
            }
        }

        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(SummarizeError::invalid_spec(messages.join("; ")));
        }

        let mut cfg = SummarizerConfig::default();
        if let Some(damping) = self.rank.damping {
            cfg.damping = damping;
        }
        if let Some(max_iterations) = self.rank.max_iterations {
            cfg.max_iterations = max_iterations;
        }
        if let Some(threshold) = self.rank.threshold {
            cfg.convergence_threshold = threshold;
        }
        if let Some(min_terms) = self.rank.min_significant_terms {
            cfg.min_significant_terms = min_terms;
        }
        if let Some(language) = self.stopwords.language {
            cfg.language = language;
        }
        if let Some(enabled) = self.stopwords.enabled {
            cfg.use_stopwords = enabled;
        }
        cfg.stopwords = self.stopwords.extra;
        cfg.validate()?;

        let budget = SummaryBudget::resolve(self.budget.word_count, self.budget.ratio)?;
        Ok((cfg, budget))
    }
}

impl Default for SummarySpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            budget: BudgetSpec::default(),
            rank: RankSpec::default(),
            stopwords: StopwordSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}
