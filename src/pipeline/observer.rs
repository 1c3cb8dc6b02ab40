//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::Sentence;

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_SPLIT: &str = "split";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What happened during one stage.
///
/// Only the timing is always present; the other fields are filled by the
/// stages they make sense for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    sentences: Option<usize>,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn sentences(&self) -> Option<usize> {
        self.sentences
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Fluent construction of a [`StageReport`] with optional fields.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn sentences(mut self, n: usize) -> Self {
        self.report.sentences = Some(n);
        self
    }

    pub fn nodes(mut self, n: usize) -> Self {
        self.report.nodes = Some(n);
        self
    }

    pub fn edges(mut self, n: usize) -> Self {
        self.report.edges = Some(n);
        self
    }

    pub fn iterations(mut self, n: usize) -> Self {
        self.report.iterations = Some(n);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, delta: f64) -> Self {
        self.report.residual = Some(delta);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks invoked by [`Pipeline::run`](super::runner::Pipeline::run).
///
/// Every method has an empty default, so observers only implement the
/// hooks they care about.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_sentences(&mut self, _sentences: &[Sentence]) {}

    fn on_graph(&mut self, _graph: &CsrGraph) {}

    fn on_rank(&mut self, _rank: &PageRankResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage timings
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Observer that emits one `tracing` event per finished stage.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            sentences = report.sentences(),
            nodes = report.nodes(),
            edges = report.edges(),
            iterations = report.iterations(),
            converged = report.converged(),
            residual = report.residual(),
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(2))
            .nodes(4)
            .edges(3)
            .iterations(17)
            .converged(true)
            .residual(5e-5)
            .build();

        assert_eq!(report.elapsed(), Duration::from_millis(2));
        assert_eq!(report.nodes(), Some(4));
        assert_eq!(report.edges(), Some(3));
        assert_eq!(report.iterations(), Some(17));
        assert_eq!(report.converged(), Some(true));
        assert_eq!(report.residual(), Some(5e-5));
        assert_eq!(report.sentences(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_SPLIT);
        obs.on_stage_end(STAGE_SPLIT, &StageReport::new(Duration::from_micros(10)));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_micros(5)));

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_SPLIT, STAGE_RANK]);
        assert_eq!(obs.total_elapsed(), Duration::from_micros(15));
        assert!(obs.report(STAGE_RANK).is_some());
        assert!(obs.report(STAGE_GRAPH).is_none());
    }

    #[test]
    fn test_noop_observer_accepts_everything() {
        let mut obs = NoopObserver;
        obs.on_stage_start(STAGE_GRAPH);
        obs.on_graph(&CsrGraph::default());
        obs.on_rank(&PageRankResult::uniform(0));
        obs.on_sentences(&[]);
    }
}
