//! Natural Language Processing components
//!
//! This module provides text normalization, sentence splitting,
//! stopword filtering and term extraction.

pub mod normalizer;
pub mod stopwords;
pub mod terms;
pub mod tokenizer;
