//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Implementations are
//! statically dispatched by [`Pipeline`](super::runner::Pipeline); every
//! trait is also object-safe for dynamic composition.

use std::borrow::Cow;

use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::nlp::normalizer::normalize;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::terms::TermExtractor;
use crate::nlp::tokenizer::Tokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::summarizer::selector::{SentenceSelector, Summary};
use crate::types::{Sentence, SummarizerConfig, SummaryBudget};

// ============================================================================
// Normalizer: raw text cleanup (stage 0)
// ============================================================================

/// Cleans the raw document before sentence splitting.
///
/// # Contract
///
/// - Must not alter word content.
/// - **Idempotent**: normalizing normalized text is a no-op.
pub trait Normalizer {
    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Replaces line breaks with spaces and trims the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreakNormalizer;

impl Normalizer for LineBreakNormalizer {
    #[inline]
    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        normalize(text)
    }
}

// ============================================================================
// SentenceSplitter: sentence boundaries (stage 1)
// ============================================================================

/// Splits normalized text into trimmed sentences in document order.
///
/// Sentence `index` values must be `0..N` in order.
pub trait SentenceSplitter {
    fn split(&self, text: &str) -> Vec<Sentence>;
}

impl SentenceSplitter for Tokenizer {
    fn split(&self, text: &str) -> Vec<Sentence> {
        Tokenizer::split(self, text)
    }
}

// ============================================================================
// SentenceGraphBuilder: similarity graph (stage 2)
// ============================================================================

/// Builds the undirected similarity graph over the sentences.
///
/// The graph must have exactly one node per sentence, no self-loops and
/// symmetric weights.
pub trait SentenceGraphBuilder {
    fn build(&self, sentences: &[Sentence], cfg: &SummarizerConfig) -> CsrGraph;
}

/// Term-overlap graph: shared significant terms over log sentence lengths.
#[derive(Debug, Clone, Default)]
pub struct OverlapGraphBuilder {
    extractor: TermExtractor,
}

impl OverlapGraphBuilder {
    /// Use the given stopword filter for term extraction
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self {
            extractor: TermExtractor::new(stopwords),
        }
    }

    /// Build the stopword filter described by the config
    pub fn from_config(cfg: &SummarizerConfig) -> Self {
        let stopwords = if cfg.use_stopwords {
            StopwordFilter::new(&cfg.language).with_extra(cfg.stopwords.as_slice())
        } else {
            StopwordFilter::empty()
        };
        Self::new(stopwords)
    }
}

impl SentenceGraphBuilder for OverlapGraphBuilder {
    fn build(&self, sentences: &[Sentence], cfg: &SummarizerConfig) -> CsrGraph {
        let (bags, _pool) = self.extractor.extract(sentences);
        let builder =
            build_graph_parallel(&bags, cfg.min_significant_terms, cfg.parallel_threshold);
        CsrGraph::from_builder(&builder)
    }
}

// ============================================================================
// Ranker: sentence scores (stage 3)
// ============================================================================

/// Scores every node of the graph; the result has one score per node.
pub trait Ranker {
    fn rank(&self, graph: &CsrGraph, cfg: &SummarizerConfig) -> PageRankResult;
}

/// Weighted PageRank using the config's damping, cap and threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRankRanker;

impl Ranker for PageRankRanker {
    fn rank(&self, graph: &CsrGraph, cfg: &SummarizerConfig) -> PageRankResult {
        StandardPageRank::new()
            .with_damping(cfg.damping)
            .with_max_iterations(cfg.max_iterations)
            .with_threshold(cfg.convergence_threshold)
            .run(graph)
    }
}

// ============================================================================
// Selector: budgeted summary (stage 4)
// ============================================================================

/// Chooses the summary sentences and returns them in document order.
pub trait Selector {
    fn select(&self, sentences: &[Sentence], rank: &PageRankResult, budget: SummaryBudget)
        -> Summary;
}

/// Greedy selection by score under a word-count or ratio budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetSelector;

impl Selector for BudgetSelector {
    fn select(
        &self,
        sentences: &[Sentence],
        rank: &PageRankResult,
        budget: SummaryBudget,
    ) -> Summary {
        SentenceSelector::new(budget).select(sentences, rank)
    }
}
