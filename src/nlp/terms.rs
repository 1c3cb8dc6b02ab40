//! Significant-term extraction
//!
//! Turns each sentence into a bag of interned, lowercase, stopword-filtered
//! terms. Sentence similarity is computed entirely on these bags.

use super::stopwords::StopwordFilter;
use crate::types::{Sentence, StringPool};
use unicode_segmentation::UnicodeSegmentation;

/// The significant terms of one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermBag {
    /// Distinct term IDs, sorted ascending
    pub terms: Vec<u32>,
    /// Number of significant tokens, counting repeats
    pub significant: usize,
}

impl TermBag {
    /// Build a bag from raw term IDs (any order, repeats allowed)
    pub fn from_ids(mut ids: Vec<u32>) -> Self {
        let significant = ids.len();
        ids.sort_unstable();
        ids.dedup();
        Self {
            terms: ids,
            significant,
        }
    }

    /// Count the distinct terms shared with another bag
    pub fn shared_terms(&self, other: &TermBag) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.terms.len() && j < other.terms.len() {
            match self.terms[i].cmp(&other.terms[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Check if the bag has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Extracts term bags from sentences
#[derive(Debug, Clone, Default)]
pub struct TermExtractor {
    stopwords: StopwordFilter,
}

impl TermExtractor {
    /// Create an extractor using the given stopword filter
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Lowercase word tokens of a text that are not stopwords
    pub fn significant_terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(move |w| !self.stopwords.is_stopword(w))
    }

    /// Build one term bag per sentence, sharing a single term pool
    pub fn extract(&self, sentences: &[Sentence]) -> (Vec<TermBag>, StringPool) {
        let mut pool = StringPool::with_capacity(sentences.len() * 8);
        let bags = sentences
            .iter()
            .map(|s| {
                let ids = self
                    .significant_terms(&s.text)
                    .map(|t| pool.intern(&t))
                    .collect();
                TermBag::from_ids(ids)
            })
            .collect();
        (bags, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str, index: usize) -> Sentence {
        Sentence::new(text, 0, text.len(), index)
    }

    #[test]
    fn test_terms_are_lowercase_and_filtered() {
        let extractor = TermExtractor::new(StopwordFilter::from_list(&["the"]));
        let terms: Vec<_> = extractor
            .significant_terms("The Black sedan hit the car.")
            .collect();

        assert_eq!(terms, vec!["black", "sedan", "hit", "car"]);
    }

    #[test]
    fn test_bags_share_pool() {
        let extractor = TermExtractor::new(StopwordFilter::new("en"));
        let sentences = vec![
            sentence("The black sedan backed up.", 0),
            sentence("The license plate of the black sedan was ABC123.", 1),
        ];
        let (bags, pool) = extractor.extract(&sentences);

        assert_eq!(bags.len(), 2);
        assert_eq!(bags[0].shared_terms(&bags[1]), 2);
        assert!(pool.id("sedan").is_some());
        assert!(pool.id("abc123").is_some());
    }

    #[test]
    fn test_bag_counts_repeats() {
        let bag = TermBag::from_ids(vec![3, 1, 3, 2]);
        assert_eq!(bag.terms, vec![1, 2, 3]);
        assert_eq!(bag.significant, 4);
    }

    #[test]
    fn test_shared_terms_disjoint() {
        let a = TermBag::from_ids(vec![1, 2]);
        let b = TermBag::from_ids(vec![3, 4]);
        assert_eq!(a.shared_terms(&b), 0);
        assert!(TermBag::default().is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let extractor = TermExtractor::default();
        let terms: Vec<_> = extractor.significant_terms("It was red").collect();
        assert_eq!(terms, vec!["it", "was", "red"]);
    }
}
