//! rapid_summarize: TextRank extractive summarization
//!
//! Sentences of a document become nodes of a similarity graph whose edges
//! count shared significant terms. Weighted PageRank scores the nodes, and
//! the best-scoring sentences that fit a word or ratio budget are returned
//! verbatim, in document order.
//!
//! # Example
//!
//! ```
//! use rapid_summarize::{summarize, Summarizer, SummaryBudget};
//!
//! let text = "The black sedan hit my car at the light. \
//!             The sun was bright. \
//!             The black sedan then sped past my car.";
//!
//! let sentences = summarize(text, Some(10), None).unwrap();
//! assert!(!sentences.is_empty());
//!
//! let summary = Summarizer::new()
//!     .summarize(text, SummaryBudget::Ratio(0.5))
//!     .unwrap();
//! assert_eq!(summary.total_sentences, 3);
//! ```

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use errors::{Result, SummarizeError};
pub use summarizer::selector::{SelectedSentence, Summary};
pub use summarizer::textrank::{summarize, summarize_batch, Summarizer};
pub use types::{Sentence, SummarizerConfig, SummaryBudget, DEFAULT_WORD_COUNT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
