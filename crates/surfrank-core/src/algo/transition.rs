//! One-step random-surfer transition model.
//!
//! Given a current page, produces the probability distribution over which
//! page a random surfer visits next: with probability `damping` follow one
//! of the page's outbound links, otherwise jump to any corpus page.

use crate::{Corpus, Distribution, Error, PageId, Result};

/// Compute the transition distribution for one random-surfer step.
///
/// Every page in the corpus receives the teleport share `(1 - damping) / N`.
/// Each page linked from `page` additionally receives `damping / |links|`;
/// the two contributions accumulate into the same entry.
///
/// A sink page (no outbound links) is treated as linking to every page in
/// the corpus, itself included: the result collapses to uniform `1 / N`,
/// ignoring the damping split.
///
/// The result is checked against the probability invariant before it is
/// returned; a validation failure here is a fatal internal fault, not a
/// recoverable input error.
///
/// # Errors
///
/// - [`Error::EmptyCorpus`] if the corpus has no pages.
/// - [`Error::DampingOutOfRange`] if `damping` is not in (0, 1).
/// - [`Error::PageNotFound`] if `page` is not in the corpus.
pub fn transition_model(corpus: &Corpus, page: &PageId, damping: f64) -> Result<Distribution> {
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    check_damping(damping)?;
    if !corpus.contains(page) {
        return Err(Error::PageNotFound(page.clone()));
    }

    let n = corpus.page_count() as f64;
    let links = corpus.links_from(page);

    let mut dist = Distribution::zeroed(corpus.pages());
    if links.is_empty() {
        for p in corpus.pages() {
            dist.set(p.clone(), 1.0 / n);
        }
    } else {
        let follow = damping / links.len() as f64;
        for target in links {
            dist.credit(target, follow);
        }
        let teleport = (1.0 - damping) / n;
        for p in corpus.pages() {
            dist.credit(p, teleport);
        }
    }

    dist.validate()?;
    Ok(dist)
}

/// Check that a damping factor lies in the open interval (0, 1).
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if !(damping > 0.0 && damping < 1.0) {
        return Err(Error::DampingOutOfRange(damping));
    }
    Ok(())
}
