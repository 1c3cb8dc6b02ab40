//! Sentence tokenizer
//!
//! Splits normalized text on Unicode sentence boundaries (UAX #29), then
//! re-joins fragments that were cut after a known abbreviation such as
//! "Dr." or "Mrs.".

use crate::types::Sentence;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations that end in a period but rarely end a sentence
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "fig", "gen", "col", "lt",
    "sgt", "capt", "rev", "hon", "approx", "dept", "e.g", "i.e", "cf", "ave", "blvd",
];

/// Rule-based sentence tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Lowercase abbreviations without their trailing period
    abbreviations: FxHashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the built-in English abbreviation list
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a tokenizer that only splits on Unicode sentence boundaries
    pub fn without_abbreviations() -> Self {
        Self {
            abbreviations: FxHashSet::default(),
        }
    }

    /// Add abbreviations (case-insensitive, trailing period optional)
    pub fn with_abbreviations(mut self, words: &[&str]) -> Self {
        for word in words {
            let word = word.trim_end_matches('.').to_lowercase();
            if !word.is_empty() {
                self.abbreviations.insert(word);
            }
        }
        self
    }

    /// Split text into trimmed sentences in document order.
    ///
    /// Text without terminal punctuation comes back as a single sentence;
    /// empty or blank text yields no sentences.
    pub fn split(&self, text: &str) -> Vec<Sentence> {
        let mut spans: Vec<(usize, usize)> = Vec::new();

        for (start, fragment) in text.split_sentence_bound_indices() {
            let end = start + fragment.len();
            match spans.last_mut() {
                Some(last)
                    if self.ends_with_abbreviation(&text[last.0..last.1])
                        || !fragment.chars().any(char::is_alphanumeric) =>
                {
                    last.1 = end;
                }
                _ => spans.push((start, end)),
            }
        }

        let mut sentences = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            let raw = &text[start..end];
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lead = raw.len() - raw.trim_start().len();
            let s = start + lead;
            sentences.push(Sentence::new(trimmed, s, s + trimmed.len(), sentences.len()));
        }

        sentences
    }

    /// Check whether a fragment ends with an abbreviation period
    fn ends_with_abbreviation(&self, fragment: &str) -> bool {
        let fragment = fragment.trim_end();
        if !fragment.ends_with('.') {
            return false;
        }

        let last_word = fragment
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim_end_matches('.');

        !last_word.is_empty() && self.abbreviations.contains(&last_word.to_lowercase())
    }
}
