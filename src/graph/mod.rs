//! Graph construction and representation
//!
//! This module builds the sentence similarity graph and stores it in
//! CSR form for ranking.

pub mod builder;
pub mod csr;
