//! Sentence similarity graph builder
//!
//! Nodes are sentences (node ID == sentence index) and undirected edges
//! carry the term-overlap similarity of the two sentences. The builder uses
//! FxHashMap adjacency for O(1) edge updates during construction; the
//! result is frozen into a [`CsrGraph`](super::csr::CsrGraph) for ranking.

use crate::nlp::terms::TermBag;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

/// Overlap similarity of two sentences.
///
/// Distinct shared terms divided by `ln|Si| + ln|Sj|`, where `|S|` counts
/// significant tokens. Sentences below `min_terms` significant tokens, or
/// pairs whose denominator is not positive, score zero.
pub fn similarity(a: &TermBag, b: &TermBag, min_terms: usize) -> f64 {
    if a.significant < min_terms || b.significant < min_terms {
        return 0.0;
    }

    let shared = a.shared_terms(b);
    if shared == 0 {
        return 0.0;
    }

    let denom = (a.significant as f64).ln() + (b.significant as f64).ln();
    if denom > 0.0 {
        shared as f64 / denom
    } else {
        0.0
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder holding `n` isolated nodes
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); n],
        }
    }

    /// Append an isolated node, returning its ID
    pub fn add_node(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(BuilderNode::default());
        id
    }

    /// Increment the edge weight between two nodes in both directions
    ///
    /// Self-loops, unknown nodes and weights that are not finite and
    /// positive are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to || !(weight.is_finite() && weight > 0.0) {
            return;
        }
        if from as usize >= self.nodes.len() || to as usize >= self.nodes.len() {
            return;
        }

        *self.nodes[from as usize].edges.entry(to).or_insert(0.0) += weight;
        *self.nodes[to as usize].edges.entry(from).or_insert(0.0) += weight;
    }

    /// Build the similarity graph over all sentence pairs
    pub fn from_term_bags(bags: &[TermBag], min_terms: usize) -> Self {
        let mut builder = Self::with_nodes(bags.len());

        for i in 0..bags.len() {
            for j in (i + 1)..bags.len() {
                let weight = similarity(&bags[i], &bags[j], min_terms);
                builder.increment_edge(i as u32, j as u32, weight);
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Weight of the edge between two nodes, zero if absent
    pub fn weight(&self, from: u32, to: u32) -> f64 {
        self.get_node(from)
            .and_then(|n| n.edges.get(&to).copied())
            .unwrap_or(0.0)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the similarity graph, computing rows in parallel for large documents
///
/// Pairwise comparison is O(N²). Below `parallel_threshold` sentences the
/// sequential build is faster. Rows are merged in index order, so both
/// paths produce the same graph.
pub fn build_graph_parallel(
    bags: &[TermBag],
    min_terms: usize,
    parallel_threshold: usize,
) -> GraphBuilder {
    if bags.len() < parallel_threshold {
        return GraphBuilder::from_term_bags(bags, min_terms);
    }

    let rows: Vec<Vec<(u32, f64)>> = (0..bags.len())
        .into_par_iter()
        .map(|i| {
            ((i + 1)..bags.len())
                .filter_map(|j| {
                    let weight = similarity(&bags[i], &bags[j], min_terms);
                    (weight > 0.0).then_some((j as u32, weight))
                })
                .collect()
        })
        .collect();

    let mut builder = GraphBuilder::with_nodes(bags.len());
    for (i, row) in rows.into_iter().enumerate() {
        for (j, weight) in row {
            builder.increment_edge(i as u32, j, weight);
        }
    }

    builder
}
