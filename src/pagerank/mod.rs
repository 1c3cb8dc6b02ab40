//! PageRank over the sentence similarity graph
//!
//! This module provides the weighted power-iteration ranker and its result
//! type (the per-sentence score vector).

pub mod standard;

use std::cmp::Reverse;

/// Two scores within this epsilon are considered tied
const SCORE_EPSILON: f64 = 1e-12;

/// Bucket a score so that near-identical floats compare equal
fn quantize(score: f64) -> i64 {
    if score.is_finite() {
        (score / SCORE_EPSILON).round() as i64
    } else {
        i64::MIN
    }
}

/// Result of a PageRank computation
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores for each node (indexed by sentence index), summing to 1
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Equal scores for `n` nodes, no iteration performed
    pub fn uniform(n: usize) -> Self {
        let scores = if n == 0 { Vec::new() } else { vec![1.0 / n as f64; n] };
        Self::new(scores, 0, 0.0, true)
    }

    /// Node IDs ordered by descending score.
    ///
    /// Scores are compared at a resolution of [`SCORE_EPSILON`] and ties go
    /// to the earlier sentence, so the ordering is stable across platforms
    /// and thread counts.
    pub fn ranking(&self) -> Vec<u32> {
        let mut order: Vec<u32> = (0..self.scores.len() as u32).collect();
        order.sort_by_key(|&i| (Reverse(quantize(self.scores[i as usize])), i));
        order
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        self.ranking()
            .into_iter()
            .take(n)
            .map(|i| (i, self.scores[i as usize]))
            .collect()
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Check if there are no scores
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
