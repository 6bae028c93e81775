//! Probability distributions over corpus pages.

use crate::{Error, PageId, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A probability distribution over the pages of a corpus.
///
/// Covers the full page set of the corpus it was computed from, with no
/// missing keys; pages that received no mass carry `0.0`. Keys are ordered,
/// so iteration, printing, and serialization are deterministic.
///
/// Distributions are created fresh per call and never mutated after being
/// returned. [`Distribution::validate`] is the shared invariant checker:
/// every value in [0, 1], and the values summing to 1 within tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    probs: BTreeMap<PageId, f64>,
}

impl Distribution {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a distribution covering `pages`, all at probability zero.
    pub fn zeroed<'a>(pages: impl IntoIterator<Item = &'a PageId>) -> Self {
        Self {
            probs: pages.into_iter().map(|p| (p.clone(), 0.0)).collect(),
        }
    }

    /// Add `amount` to a page's probability, inserting the page if missing.
    pub fn credit(&mut self, page: &PageId, amount: f64) {
        *self.probs.entry(page.clone()).or_insert(0.0) += amount;
    }

    /// Set a page's probability outright.
    pub fn set(&mut self, page: PageId, value: f64) {
        self.probs.insert(page, value);
    }

    /// Probability of a page, if present.
    pub fn get(&self, page: &PageId) -> Option<f64> {
        self.probs.get(page).copied()
    }

    /// Number of pages covered.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether the distribution covers no pages.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterate over `(page, probability)` pairs in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&PageId, f64)> {
        self.probs.iter().map(|(page, &p)| (page, p))
    }

    /// Sum of all probabilities.
    pub fn sum(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Check the probability invariant.
    ///
    /// Fails with [`Error::InvalidProbability`] if any value lies outside
    /// [0, 1], or [`Error::InvalidProbabilitySum`] if the values, summed and
    /// rounded to 3 decimal places, are not exactly 1.0.
    ///
    /// Estimators call this as a hard assertion on everything they produce;
    /// a failure means the algorithm is broken and the computation must
    /// abort, not renormalize.
    pub fn validate(&self) -> Result<()> {
        let mut sum = 0.0;
        for (page, &p) in &self.probs {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidProbability {
                    page: page.clone(),
                    value: p,
                });
            }
            sum += p;
        }

        if (sum * 1000.0).round() != 1000.0 {
            return Err(Error::InvalidProbabilitySum { sum });
        }

        Ok(())
    }
}
