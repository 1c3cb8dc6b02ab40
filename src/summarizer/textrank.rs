//! TextRank extractive summarizer
//!
//! Ties the pipeline together behind a small API: validate the budget, run
//! normalize → split → graph → rank → select, and hand back the chosen
//! sentences in document order.

use crate::errors::{Result, SummarizeError};
use crate::pipeline::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::runner::SummaryPipeline;
use crate::summarizer::selector::Summary;
use crate::types::{SummarizerConfig, SummaryBudget};
use rayon::prelude::*;

/// Extractive summarizer with a fixed configuration.
///
/// Holds only immutable state after construction, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummarizerConfig,
    pipeline: SummaryPipeline,
}

impl Default for Summarizer {
    fn default() -> Self {
        let config = SummarizerConfig::default();
        Self {
            pipeline: SummaryPipeline::from_config(&config),
            config,
        }
    }
}

impl Summarizer {
    /// Summarizer with the default configuration (English stopwords)
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizer with a custom configuration
    pub fn with_config(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: SummaryPipeline::from_config(&config),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize a document under the given budget.
    ///
    /// An empty or whitespace-only document yields an empty summary.
    pub fn summarize(&self, text: &str, budget: SummaryBudget) -> Result<Summary> {
        self.summarize_with_observer(text, budget, &mut NoopObserver)
    }

    /// Like [`summarize`](Self::summarize), reporting each stage to `observer`.
    pub fn summarize_with_observer(
        &self,
        text: &str,
        budget: SummaryBudget,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary> {
        budget.validate()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(chars = text.len(), ?budget, "summarizing document");

        Ok(self.pipeline.run(text, budget, &self.config, observer))
    }

    /// Like [`summarize`](Self::summarize), but a document without any
    /// sentence is an error.
    pub fn summarize_non_empty(&self, text: &str, budget: SummaryBudget) -> Result<Summary> {
        let summary = self.summarize(text, budget)?;
        if summary.is_empty() {
            return Err(SummarizeError::DocumentEmpty);
        }
        Ok(summary)
    }

    /// Summarize many documents in parallel.
    ///
    /// Results keep the order of `texts`. The budget is checked once up front.
    pub fn summarize_batch(&self, texts: &[&str], budget: SummaryBudget) -> Result<Vec<Summary>> {
        budget.validate()?;
        Ok(texts
            .par_iter()
            .map(|text| self.pipeline.run(text, budget, &self.config, &mut NoopObserver))
            .collect())
    }
}

/// Summarize `document` and return the selected sentences in document order.
///
/// `target_word_count` takes precedence when both targets are given; with
/// neither the summary aims for 30 words. Both values are validated even when
/// only one is used.
///
/// ```
/// let summary = rapid_summarize::summarize(
///     "The cat sat on the mat. The dog chased the cat off the mat. Rain fell.",
///     Some(10),
///     None,
/// )
/// .unwrap();
/// assert!(!summary.is_empty());
/// ```
pub fn summarize(
    document: &str,
    target_word_count: Option<usize>,
    target_ratio: Option<f64>,
) -> Result<Vec<String>> {
    let budget = SummaryBudget::resolve(target_word_count, target_ratio)?;
    Ok(Summarizer::new().summarize(document, budget)?.into_texts())
}

/// Summarize several documents in parallel with the default configuration.
pub fn summarize_batch(documents: &[&str], budget: SummaryBudget) -> Result<Vec<Vec<String>>> {
    Ok(Summarizer::new()
        .summarize_batch(documents, budget)?
        .into_iter()
        .map(Summary::into_texts)
        .collect())
}
