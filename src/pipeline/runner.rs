//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of pipeline stages.
//! Calling [`Pipeline::run`] executes them in order, threading artifacts
//! between stages and notifying an optional [`PipelineObserver`] at each
//! boundary.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler monomorphizes
//! each combination into a unique concrete type. Zero-sized default stages
//! (e.g., [`LineBreakNormalizer`], [`PageRankRanker`], [`BudgetSelector`])
//! add zero bytes and zero runtime cost.

use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_GRAPH, STAGE_NORMALIZE,
    STAGE_RANK, STAGE_SELECT, STAGE_SPLIT,
};
use crate::pipeline::traits::{
    BudgetSelector, LineBreakNormalizer, Normalizer, OverlapGraphBuilder, PageRankRanker, Ranker,
    SentenceGraphBuilder, SentenceSplitter, Selector,
};
use crate::summarizer::selector::Summary;
use crate::types::{SummarizerConfig, SummaryBudget};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Norm` | [`Normalizer`] | [`LineBreakNormalizer`] |
/// | `Split` | [`SentenceSplitter`] | [`Tokenizer`] |
/// | `GB` | [`SentenceGraphBuilder`] | [`OverlapGraphBuilder`] |
/// | `Rnk` | [`Ranker`] | [`PageRankRanker`] |
/// | `Sel` | [`Selector`] | [`BudgetSelector`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Norm, Split, GB, Rnk, Sel> {
    pub normalizer: Norm,
    pub splitter: Split,
    pub graph_builder: GB,
    pub ranker: Rnk,
    pub selector: Sel,
}

/// Type alias for the default TextRank summarization pipeline.
pub type SummaryPipeline =
    Pipeline<LineBreakNormalizer, Tokenizer, OverlapGraphBuilder, PageRankRanker, BudgetSelector>;

impl SummaryPipeline {
    /// Build the standard pipeline, with stopwords taken from `cfg`.
    pub fn from_config(cfg: &SummarizerConfig) -> Self {
        Pipeline {
            normalizer: LineBreakNormalizer,
            splitter: Tokenizer::new(),
            graph_builder: OverlapGraphBuilder::from_config(cfg),
            ranker: PageRankRanker,
            selector: BudgetSelector,
        }
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<Norm, Split, GB, Rnk, Sel> Pipeline<Norm, Split, GB, Rnk, Sel>
where
    Norm: Normalizer,
    Split: SentenceSplitter,
    GB: SentenceGraphBuilder,
    Rnk: Ranker,
    Sel: Selector,
{
    /// Execute the pipeline, producing a [`Summary`].
    ///
    /// Stages run in order:
    /// 1. Normalize the raw text
    /// 2. Split into sentences
    /// 3. Build the similarity graph
    /// 4. Rank sentences
    /// 5. Select the summary
    ///
    /// A document without sentences stops after splitting with an empty
    /// summary. The budget is assumed to be valid.
    pub fn run(
        &self,
        text: &str,
        budget: SummaryBudget,
        cfg: &SummarizerConfig,
        observer: &mut impl PipelineObserver,
    ) -> Summary {
        // Stage 0: Normalize
        trace_stage!(STAGE_NORMALIZE);
        observer.on_stage_start(STAGE_NORMALIZE);
        let clock = StageClock::start();
        let normalized = self.normalizer.normalize(text);
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_NORMALIZE, &report);

        // Stage 1: Split sentences
        trace_stage!(STAGE_SPLIT);
        observer.on_stage_start(STAGE_SPLIT);
        let clock = StageClock::start();
        let sentences = self.splitter.split(&normalized);
        let report = StageReportBuilder::new(clock.elapsed())
            .sentences(sentences.len())
            .build();
        observer.on_stage_end(STAGE_SPLIT, &report);
        observer.on_sentences(&sentences);

        if sentences.is_empty() {
            return Summary::empty(budget);
        }

        // Stage 2: Build graph
        trace_stage!(STAGE_GRAPH);
        observer.on_stage_start(STAGE_GRAPH);
        let clock = StageClock::start();
        let graph = self.graph_builder.build(&sentences, cfg);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.num_nodes)
            .edges(graph.num_edges() / 2)
            .build();
        observer.on_stage_end(STAGE_GRAPH, &report);
        observer.on_graph(&graph);

        // Stage 3: Rank
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let rank = self.ranker.rank(&graph, cfg);
        let report = StageReportBuilder::new(clock.elapsed())
            .iterations(rank.iterations)
            .converged(rank.converged)
            .residual(rank.delta)
            .build();
        observer.on_stage_end(STAGE_RANK, &report);
        observer.on_rank(&rank);

        // Stage 4: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let summary = self.selector.select(&sentences, &rank, budget);
        let report = StageReportBuilder::new(clock.elapsed())
            .sentences(summary.len())
            .build();
        observer.on_stage_end(STAGE_SELECT, &report);

        summary
    }
}

// ============================================================================
// PipelineBuilder: fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the default stages (English stopwords) and allows
/// overriding individual stages.
///
/// ```
/// # use rapid_summarize::pipeline::runner::PipelineBuilder;
/// # use rapid_summarize::nlp::tokenizer::Tokenizer;
/// let pipeline = PipelineBuilder::new()
///     .splitter(Tokenizer::without_abbreviations())
///     .build();
/// ```
pub struct PipelineBuilder<
    Norm = LineBreakNormalizer,
    Split = Tokenizer,
    GB = OverlapGraphBuilder,
    Rnk = PageRankRanker,
    Sel = BudgetSelector,
> {
    normalizer: Norm,
    splitter: Split,
    graph_builder: GB,
    ranker: Rnk,
    selector: Sel,
}

impl PipelineBuilder {
    /// Start building from the default stages.
    pub fn new() -> Self {
        Self::from_config(&SummarizerConfig::default())
    }

    /// Start building from the default stages configured by `cfg`.
    pub fn from_config(cfg: &SummarizerConfig) -> Self {
        let Pipeline {
            normalizer,
            splitter,
            graph_builder,
            ranker,
            selector,
        } = SummaryPipeline::from_config(cfg);
        PipelineBuilder {
            normalizer,
            splitter,
            graph_builder,
            ranker,
            selector,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Norm, Split, GB, Rnk, Sel> PipelineBuilder<Norm, Split, GB, Rnk, Sel> {
    /// Override the normalizer stage.
    pub fn normalizer<N: Normalizer>(self, n: N) -> PipelineBuilder<N, Split, GB, Rnk, Sel> {
        PipelineBuilder {
            normalizer: n,
            splitter: self.splitter,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: self.selector,
        }
    }

    /// Override the sentence splitter stage.
    pub fn splitter<S: SentenceSplitter>(self, s: S) -> PipelineBuilder<Norm, S, GB, Rnk, Sel> {
        PipelineBuilder {
            normalizer: self.normalizer,
            splitter: s,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: self.selector,
        }
    }

    /// Override the graph builder stage.
    pub fn graph_builder<G: SentenceGraphBuilder>(
        self,
        g: G,
    ) -> PipelineBuilder<Norm, Split, G, Rnk, Sel> {
        PipelineBuilder {
            normalizer: self.normalizer,
            splitter: self.splitter,
            graph_builder: g,
            ranker: self.ranker,
            selector: self.selector,
        }
    }

    /// Override the ranker stage.
    pub fn ranker<R: Ranker>(self, r: R) -> PipelineBuilder<Norm, Split, GB, R, Sel> {
        PipelineBuilder {
            normalizer: self.normalizer,
            splitter: self.splitter,
            graph_builder: self.graph_builder,
            ranker: r,
            selector: self.selector,
        }
    }

    /// Override the selector stage.
    pub fn selector<S: Selector>(self, s: S) -> PipelineBuilder<Norm, Split, GB, Rnk, S> {
        PipelineBuilder {
            normalizer: self.normalizer,
            splitter: self.splitter,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: s,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<Norm, Split, GB, Rnk, Sel> {
        Pipeline {
            normalizer: self.normalizer,
            splitter: self.splitter,
            graph_builder: self.graph_builder,
            ranker: self.ranker,
            selector: self.selector,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
