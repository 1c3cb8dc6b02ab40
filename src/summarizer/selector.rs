//! Budgeted sentence selection for summarization
//!
//! Takes sentences in descending score order until the word budget would
//! be exceeded (or the top `ceil(ratio * N)` for a ratio budget), then puts
//! the chosen sentences back into document order.

use crate::pagerank::PageRankResult;
use crate::types::{Sentence, SummaryBudget};
use serde::Serialize;

/// Slack applied before rounding `ratio * N` up, so 0.3 * 10 selects 3
const RATIO_EPSILON: f64 = 1e-9;

/// A selected sentence with its ranking information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSentence {
    /// The sentence
    pub sentence: Sentence,
    /// PageRank score
    pub score: f64,
    /// Position in the score ranking (1-indexed)
    pub rank: usize,
}

/// An extractive summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Selected sentences in document order
    pub sentences: Vec<SelectedSentence>,
    /// Total words across the selected sentences
    pub word_count: usize,
    /// Budget that governed selection
    pub budget: SummaryBudget,
    /// Number of sentences in the source document
    pub total_sentences: usize,
    /// PageRank iterations performed
    pub iterations: usize,
    /// Whether PageRank converged
    pub converged: bool,
}

impl Summary {
    /// An empty summary for a document without sentences
    pub fn empty(budget: SummaryBudget) -> Self {
        Self {
            sentences: Vec::new(),
            word_count: 0,
            budget,
            total_sentences: 0,
            iterations: 0,
            converged: true,
        }
    }

    /// Selected sentence texts in document order
    pub fn texts(&self) -> Vec<String> {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.clone())
            .collect()
    }

    /// Consume the summary, keeping only the sentence texts
    pub fn into_texts(self) -> Vec<String> {
        self.sentences.into_iter().map(|s| s.sentence.text).collect()
    }

    /// Selected sentences joined by a single space
    pub fn joined(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of selected sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Budget-driven sentence selector
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSelector {
    budget: SummaryBudget,
}

impl SentenceSelector {
    /// Create a selector for the given budget
    pub fn new(budget: SummaryBudget) -> Self {
        Self { budget }
    }

    /// Select by word budget
    pub fn with_word_count(word_count: usize) -> Self {
        Self::new(SummaryBudget::WordCount(word_count))
    }

    /// Select by sentence ratio
    pub fn with_ratio(ratio: f64) -> Self {
        Self::new(SummaryBudget::Ratio(ratio))
    }

    /// The governing budget
    pub fn budget(&self) -> SummaryBudget {
        self.budget
    }

    /// Select sentences using their ranking.
    ///
    /// Non-empty input always yields at least the top-ranked sentence.
    pub fn select(&self, sentences: &[Sentence], rank: &PageRankResult) -> Summary {
        let n = sentences.len();
        if n == 0 {
            return Summary::empty(self.budget);
        }

        let order = if rank.scores.len() == n {
            rank.ranking()
        } else {
            PageRankResult::uniform(n).ranking()
        };

        let mut picked: Vec<u32> = match self.budget {
            SummaryBudget::WordCount(limit) => {
                let mut total = 0;
                order
                    .iter()
                    .copied()
                    .take_while(|&id| {
                        total += sentences[id as usize].word_count;
                        total <= limit
                    })
                    .collect()
            }
            SummaryBudget::Ratio(ratio) => {
                let k = (ratio * n as f64 - RATIO_EPSILON).ceil().max(1.0) as usize;
                order.iter().copied().take(k.min(n)).collect()
            }
        };

        if picked.is_empty() {
            picked.push(order[0]);
        }

        #[cfg(feature = "tracing")]
        {
            if picked.len() == n {
                tracing::debug!(
                    sentences = n,
                    "document fits in the budget; every sentence selected"
                );
            }
        }

        let mut rank_of = vec![0usize; n];
        for (pos, &id) in order.iter().enumerate() {
            rank_of[id as usize] = pos + 1;
        }

        picked.sort_unstable();
        let selected: Vec<SelectedSentence> = picked
            .into_iter()
            .map(|id| SelectedSentence {
                sentence: sentences[id as usize].clone(),
                score: rank.score(id),
                rank: rank_of[id as usize],
            })
            .collect();

        Summary {
            word_count: selected.iter().map(|s| s.sentence.word_count).sum(),
            sentences: selected,
            budget: self.budget,
            total_sentences: n,
            iterations: rank.iterations,
            converged: rank.converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sentences(texts: &[&str]) -> Vec<Sentence> {
        let mut offset = 0;
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let s = Sentence::new(*t, offset, offset + t.len(), i);
                offset += t.len() + 1;
                s
            })
            .collect()
    }

    fn sample() -> (Vec<Sentence>, PageRankResult) {
        let sentences = make_sentences(&[
            "one two three four five.",
            "one two three.",
            "one two three four.",
            "one two.",
        ]);
        let rank = PageRankResult::new(vec![0.1, 0.4, 0.3, 0.2], 12, 1e-5, true);
        (sentences, rank)
    }

    #[test]
    fn test_word_budget_takes_ranked_prefix() {
        let (sentences, rank) = sample();
        // Ranking: 1 (3 words), 2 (4 words), 3 (2 words), 0 (5 words)
        let summary = SentenceSelector::with_word_count(8).select(&sentences, &rank);

        let indices: Vec<_> = summary.sentences.iter().map(|s| s.sentence.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(summary.word_count, 7);
    }

    #[test]
    fn test_word_budget_stops_at_first_overflow() {
        let (sentences, rank) = sample();
        // 1 + 2 = 7 words; adding 3 (2 words) would make 9 > 8 even though 0 is later
        let summary = SentenceSelector::with_word_count(8).select(&sentences, &rank);
        assert!(summary.sentences.iter().all(|s| s.sentence.index != 3));
    }

    #[test]
    fn test_document_order() {
        let (sentences, rank) = sample();
        let summary = SentenceSelector::with_word_count(100).select(&sentences, &rank);

        assert_eq!(summary.len(), 4);
        for i in 1..summary.len() {
            assert!(summary.sentences[i].sentence.index > summary.sentences[i - 1].sentence.index);
        }
        assert_eq!(summary.sentences[1].rank, 1);
        assert_eq!(summary.sentences[0].rank, 4);
    }

    #[test]
    fn test_budget_smaller_than_any_sentence_keeps_top() {
        let (sentences, rank) = sample();
        let summary = SentenceSelector::with_word_count(1).select(&sentences, &rank);

        assert_eq!(summary.texts(), vec!["one two three."]);
    }

    #[test]
    fn test_ratio_selection() {
        let (sentences, rank) = sample();

        let summary = SentenceSelector::with_ratio(0.5).select(&sentences, &rank);
        let indices: Vec<_> = summary.sentences.iter().map(|s| s.sentence.index).collect();
        assert_eq!(indices, vec![1, 2]);

        // ceil(0.3 * 4) = 2
        assert_eq!(SentenceSelector::with_ratio(0.3).select(&sentences, &rank).len(), 2);
        assert_eq!(SentenceSelector::with_ratio(0.01).select(&sentences, &rank).len(), 1);
        assert_eq!(SentenceSelector::with_ratio(1.0).select(&sentences, &rank).len(), 4);
    }

    #[test]
    fn test_ratio_rounding_tolerates_float_error() {
        let sentences = make_sentences(&["a b."; 10]);
        let rank = PageRankResult::uniform(10);
        let summary = SentenceSelector::with_ratio(0.3).select(&sentences, &rank);
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let summary = SentenceSelector::default().select(&[], &PageRankResult::uniform(0));

        assert!(summary.is_empty());
        assert_eq!(summary.budget, SummaryBudget::WordCount(30));
    }

    #[test]
    fn test_mismatched_scores_fall_back_to_position() {
        let (sentences, _) = sample();
        let rank = PageRankResult::uniform(2);
        let summary = SentenceSelector::with_word_count(1).select(&sentences, &rank);

        assert_eq!(summary.sentences[0].sentence.index, 0);
    }

    #[test]
    fn test_joined_and_metadata() {
        let (sentences, rank) = sample();
        let summary = SentenceSelector::with_word_count(8).select(&sentences, &rank);

        assert_eq!(summary.joined(), "one two three. one two three four.");
        assert_eq!(summary.total_sentences, 4);
        assert_eq!(summary.iterations, 12);
        assert!(summary.converged);
        assert_eq!(summary.into_texts().len(), 2);
    }
}
