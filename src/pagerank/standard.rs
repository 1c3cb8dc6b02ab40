//! Weighted PageRank by power iteration
//!
//! Each round a node keeps the random-jump share `(1 - d) / N` and receives
//! `d * score(j) * w(j, i) / W(j)` from every neighbour `j`, where `W(j)` is
//! the neighbour's total edge weight. Isolated sentences pass nothing on; the
//! vector is renormalised at the end.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

/// Standard weighted PageRank
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 delta
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with
    /// `converged=false`. A graph without edges gets uniform scores and no
    /// iteration.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 || graph.num_edges() == 0 {
            return PageRankResult::uniform(n);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= self.threshold {
            iterations += 1;

            new_scores.fill(teleport);

            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                // Zero out-weight: contributes nothing rather than dividing by zero
                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] +=
                            self.damping * node_score * weight / total_weight;
                    }
                }
            }

            // L1 norm
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 && sum.is_finite() {
            for score in &mut scores {
                *score /= sum;
            }
        } else {
            return PageRankResult::uniform(n);
        }

        let converged = delta < self.threshold;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(nodes = n, iterations, delta, converged, "pagerank finished");
            let isolated = graph.dangling_nodes();
            if !isolated.is_empty() {
                tracing::debug!(
                    isolated = isolated.len(),
                    "sentences without edges keep only the random-jump share"
                );
            }
            if !converged {
                tracing::warn!(
                    max_iterations = self.max_iterations,
                    delta,
                    "pagerank hit the iteration cap before converging"
                );
            }
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
