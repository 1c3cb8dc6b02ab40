//! Summarization components
//!
//! Provides budgeted sentence selection and the [`textrank::Summarizer`]
//! that drives the full pipeline.

pub mod selector;
pub mod textrank;
