// Allow minor clippy style warnings at crate level
// These are mostly style preferences, not bugs
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! Core types and algorithms for ranking hyperlinked page corpora.
//!
//! This crate estimates the relative importance of pages in a directed link
//! graph under the `PageRank` model, via two independent estimators:
//!
//! - [`algo::sampling`] - a stochastic random-surfer sampler
//! - [`algo::iterative`] - a deterministic power-iteration solver
//!
//! Both are built on the shared one-step [`algo::transition`] model, and
//! every distribution either of them produces is checked against the
//! probability invariant ([`Distribution::validate`]) before it is returned.
//!
//! Corpus construction from raw documents is an input concern and lives in
//! [`formats`]; the estimators only see the pruned [`Corpus`].
//!
//! # Example
//!
//! ```rust
//! use surfrank_core::algo::iterative::{iterate_pagerank, IterateConfig};
//! use surfrank_core::Corpus;
//!
//! let mut corpus = Corpus::new();
//! corpus.add_link("1.html", "2.html");
//! corpus.add_link("2.html", "1.html");
//! corpus.add_link("2.html", "3.html");
//!
//! let ranks = iterate_pagerank(&corpus, IterateConfig::default()).unwrap();
//! assert_eq!(ranks.len(), 3);
//! ```

pub mod algo;
mod corpus;
mod distribution;
mod error;
pub mod formats;
mod page;

pub use corpus::{Corpus, CorpusStats};
pub use distribution::Distribution;
pub use error::{Error, Result};
pub use page::PageId;

// Re-export petgraph for advanced graph operations
pub use petgraph;
