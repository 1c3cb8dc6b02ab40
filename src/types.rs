//! Core types for rapid_summarize
//!
//! Sentences, summary budgets, term interning and the summarizer
//! configuration shared by every pipeline stage.

use crate::errors::{Result, SummarizeError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Word budget used when the caller supplies neither a word count nor a ratio
pub const DEFAULT_WORD_COUNT: usize = 30;

// ============================================================================
// String Interning
// ============================================================================

/// A pool for interning terms so that sentence term bags compare as integers.
///
/// Each distinct term is stored once; a document with N sentences typically
/// repeats the same handful of content words many times.
#[derive(Debug, Default)]
pub struct StringPool {
    string_to_id: FxHashMap<Arc<str>, u32>,
    id_to_string: Vec<Arc<str>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a string pool with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            string_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            id_to_string: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.string_to_id.get(s) {
            return id;
        }

        let id = self.id_to_string.len() as u32;
        let arc: Arc<str> = s.into();
        self.string_to_id.insert(arc.clone(), id);
        self.id_to_string.push(arc);
        id
    }

    /// Look up the ID of an already interned string
    pub fn id(&self, s: &str) -> Option<u32> {
        self.string_to_id.get(s).copied()
    }

    /// Get a string by its ID
    pub fn get(&self, id: u32) -> Option<&str> {
        self.id_to_string.get(id as usize).map(|s| s.as_ref())
    }

    /// Get the number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

// ============================================================================
// Sentence
// ============================================================================

/// A sentence of the normalized document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text, trimmed
    pub text: String,
    /// Start byte offset in the normalized text
    pub start: usize,
    /// End byte offset in the normalized text
    pub end: usize,
    /// Ordinal position in the document (0-based)
    pub index: usize,
    /// Number of whitespace-separated words
    pub word_count: usize,
}

impl Sentence {
    /// Create a new sentence; the word count is derived from the text
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        let text = text.into();
        let word_count = count_words(&text);
        Self {
            text,
            start,
            end,
            index,
            word_count,
        }
    }
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

// ============================================================================
// Summary Budget
// ============================================================================

/// How much of the document the summary may keep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryBudget {
    /// Keep the best sentences while their total word count fits
    WordCount(usize),
    /// Keep the best `ceil(ratio * N)` sentences
    Ratio(f64),
}

impl Default for SummaryBudget {
    fn default() -> Self {
        SummaryBudget::WordCount(DEFAULT_WORD_COUNT)
    }
}

impl SummaryBudget {
    /// Resolve the pair of optional caller budgets into one.
    ///
    /// Every supplied value is validated. When both are supplied the word
    /// count governs; when neither is, the default word count applies.
    pub fn resolve(word_count: Option<usize>, ratio: Option<f64>) -> Result<Self> {
        let word_count = word_count.map(SummaryBudget::WordCount);
        let ratio = ratio.map(SummaryBudget::Ratio);

        for budget in word_count.iter().chain(ratio.iter()) {
            budget.validate()?;
        }

        Ok(word_count.or(ratio).unwrap_or_default())
    }

    /// Check that the budget is in range
    pub fn validate(&self) -> Result<()> {
        match *self {
            SummaryBudget::WordCount(0) => Err(SummarizeError::invalid_budget(
                "word_count must be a positive integer",
            )),
            SummaryBudget::Ratio(r) if !(r > 0.0 && r <= 1.0) => Err(
                SummarizeError::invalid_budget(format!("ratio must be in (0, 1], got {r}")),
            ),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for sentence ranking and term filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Damping factor for PageRank (typically 0.85)
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    pub max_iterations: usize,
    /// Convergence threshold on the L1 delta between iterations
    pub convergence_threshold: f64,
    /// Language code for the built-in stopword list (e.g., "en", "de")
    pub language: String,
    /// Additional stopwords appended to the built-in list
    pub stopwords: Vec<String>,
    /// Whether to drop stopwords before comparing sentences
    pub use_stopwords: bool,
    /// Sentences with fewer significant terms than this get no edges
    pub min_significant_terms: usize,
    /// Sentence count from which pairwise similarity runs on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-4,
            language: "en".to_string(),
            stopwords: Vec::new(),
            use_stopwords: true,
            min_significant_terms: 2,
            parallel_threshold: 256,
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(SummarizeError::invalid_config(format!(
                "damping must be between 0 and 1 (exclusive), got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(SummarizeError::invalid_config("max_iterations must be > 0"));
        }

        if !(self.convergence_threshold > 0.0 && self.convergence_threshold.is_finite()) {
            return Err(SummarizeError::invalid_config(format!(
                "convergence_threshold must be finite and > 0, got {}",
                self.convergence_threshold
            )));
        }

        if self.min_significant_terms == 0 {
            return Err(SummarizeError::invalid_config(
                "min_significant_terms must be > 0",
            ));
        }

        Ok(())
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set stopword language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: add extra stopwords
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Builder method: enable or disable stopword filtering
    pub fn with_use_stopwords(mut self, use_stopwords: bool) -> Self {
        self.use_stopwords = use_stopwords;
        self
    }

    /// Builder method: set the minimum significant term count
    pub fn with_min_significant_terms(mut self, min: usize) -> Self {
        self.min_significant_terms = min;
        self
    }

    /// Builder method: set the parallel similarity threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
